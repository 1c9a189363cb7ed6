// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Everything from the first positional token onwards is the command
//! template, including tokens that look like `ratexec` options.

use clap::{Parser, ValueEnum};

use crate::config::{MAX_INFLIGHT, MAX_RATE};

/// Command-line arguments for `ratexec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ratexec",
    version,
    about = "Run a command once per stdin line, with a rate limit and a concurrency cap.",
    long_about = None
)]
pub struct CliArgs {
    /// Lines admitted per second.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=MAX_RATE as i64)
    )]
    pub rate: u32,

    /// Maximum number of commands running at the same time.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=MAX_INFLIGHT as i64)
    )]
    pub inflight: u32,

    /// Level for ratexec's own log events on stderr (error, warn, info,
    /// debug, trace).
    ///
    /// If omitted, the `RATEXEC_LOG` filter is used, else only warnings.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to run for each line. `{}` in an argument is replaced with
    /// the line.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true
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
