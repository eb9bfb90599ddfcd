// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `croncape`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "croncape",
    version,
    about = "Run a command and mail a report when it fails or times out.",
    long_about = None
)]
pub struct CliArgs {
    /// Timeout for the command, like "-t 2h", "-t 2m", or "-t 30s".
    ///
    /// Units must be whole numbers: write "1h30m" rather than "1.5h".
    /// After the timeout the command and all of its children are killed.
    /// Disabled by default.
    #[arg(short = 't', long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Transport to use: "auto", "mail" or "sendmail".
    #[arg(short = 'p', long, value_name = "TRANSPORT", default_value = "auto")]
    pub transport: String,

    /// Send the report even if the command is successful.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write the command's standard output to this file (overwrite).
    #[arg(short = 'w', long, value_name = "PATH", conflicts_with = "append")]
    pub write: Option<PathBuf>,

    /// Append the command's standard output to this file.
    #[arg(short = 'a', long, value_name = "PATH")]
    pub append: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRONCAPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// The command to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
