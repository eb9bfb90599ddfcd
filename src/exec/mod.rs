// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the supervised command,
//! using `tokio::process::Command`, and producing a [`RunResult`].
//!
//! - [`supervisor`] spawns the command, captures its output and races the
//!   exit against the timeout.
//! - [`terminate`] kills a whole process tree, one implementation per
//!   platform.
//! - [`exit`] decodes exit statuses into codes.
//! - [`result`] holds the [`RunResult`] type.

pub mod exit;
pub mod result;
pub mod supervisor;
pub mod terminate;

pub use result::RunResult;
pub use supervisor::{execute, execute_with};
pub use terminate::{PlatformTerminator, Terminate};
