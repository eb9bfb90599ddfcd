// src/config/mod.rs

//! Run configuration.
//!
//! - [`model`] holds the raw and validated request types.
//! - [`loader`] assembles a raw request from CLI arguments and environment.
//! - [`validate`] turns a raw request into a [`Request`] or a
//!   `ConfigError`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_sources};
pub use model::{OutputTarget, RawRequest, Request};
pub use validate::parse_timeout;
