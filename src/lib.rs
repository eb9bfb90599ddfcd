// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod notify;
pub mod report;
pub mod types;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{OutputTarget, Request};
use crate::errors::Result;
use crate::exec::RunResult;
use crate::fs::{FileSystem, RealFileSystem};
use crate::notify::{Deliver, Notifier, RealDelivery};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - request assembly from CLI flags and `MAIL*` variables
/// - supervision in the current working directory
/// - output persistence
/// - local printing or mail delivery of the report
pub async fn run(args: CliArgs) -> Result<()> {
    let request = config::load_and_validate(&args)?;
    let wd = std::env::current_dir().context("reading current working directory")?;

    let mut stdout = std::io::stdout();
    supervise_and_report(&wd, request, &RealFileSystem, RealDelivery, &mut stdout).await?;
    Ok(())
}

/// Run `request` in `dir`, persist its output, and report it if warranted.
///
/// The report goes to `out` when there are no recipients and through
/// `delivery` otherwise. Returns the run's result once reporting succeeded.
pub async fn supervise_and_report<D: Deliver>(
    dir: &Path,
    request: Request,
    fs: &dyn FileSystem,
    delivery: D,
    out: &mut dyn Write,
) -> Result<RunResult> {
    let result = exec::execute(dir, request).await;

    persist_output(&result, fs)?;

    if !result.should_report() {
        debug!(code = result.code, "command succeeded; nothing to report");
        return Ok(result);
    }

    if result.request.recipients().is_empty() {
        info!("no recipients configured; printing report");
        writeln!(out, "{}", report::render(&result))?;
        return Ok(result);
    }

    let transport = notify::select(result.request.transport, fs)?;
    let hostname = notify::resolve_hostname(result.request.mail_host.as_deref());

    Notifier::new(delivery)
        .notify_result(&result, &transport, &hostname)
        .await?;

    Ok(result)
}

/// Apply the `--write` / `--append` target, if any.
fn persist_output(result: &RunResult, fs: &dyn FileSystem) -> Result<()> {
    match &result.request.output {
        Some(OutputTarget::Write(path)) => fs.write(path, &result.stdout)?,
        Some(OutputTarget::Append(path)) => fs.append(path, &result.stdout)?,
        None => {}
    }
    Ok(())
}
