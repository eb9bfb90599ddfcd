// src/config/loader.rs

use crate::cli::CliArgs;
use crate::config::model::{RawRequest, Request};
use crate::errors::Result;

pub const ENV_MAILTO: &str = "MAILTO";
pub const ENV_MAILFROM: &str = "MAILFROM";
pub const ENV_MAILHOST: &str = "MAILHOST";

/// Gather the raw request from parsed CLI arguments and an environment
/// lookup.
///
/// The lookup is injected so tests can supply their own variables instead of
/// touching the real process environment.
pub fn load_from_sources<F>(args: &CliArgs, env: F) -> RawRequest
where
    F: Fn(&str) -> Option<String>,
{
    RawRequest {
        command: args.command.clone(),
        emails: env(ENV_MAILTO),
        from: env(ENV_MAILFROM),
        mail_host: env(ENV_MAILHOST),
        timeout: args.timeout.clone(),
        transport: args.transport.clone(),
        verbose: args.verbose,
        write: args.write.clone(),
        append: args.append.clone(),
    }
}

/// Build and validate a [`Request`] from CLI arguments and the real process
/// environment.
///
/// This is the recommended entry point for the binary:
///
/// - Reads `MAILTO`, `MAILFROM`, `MAILHOST`.
/// - Checks for an empty command, an unknown transport and a malformed
///   timeout.
pub fn load_and_validate(args: &CliArgs) -> Result<Request> {
    let raw = load_from_sources(args, |key| std::env::var(key).ok());
    Request::try_from(raw)
}
