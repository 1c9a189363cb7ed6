// src/logging.rs

//! Logging setup for `ratexec` using `tracing` + `tracing-subscriber`.
//!
//! Stdout belongs to the spawned commands and the final elapsed line, so logs
//! only ever go to stderr. A default run stays quiet there: only ratexec's
//! own warnings (the aggregate failure count, a broken input stream) are
//! shown. Per-command results are debug events.
//!
//! Filter priority:
//! 1. `--log-level`, applied to ratexec's own targets
//! 2. `RATEXEC_LOG`, taken as an `EnvFilter` directive string
//!    (e.g. `debug` or `ratexec::pipeline::limiter=trace`)
//! 3. `ratexec=warn`

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "RATEXEC_LOG";

const DEFAULT_DIRECTIVE: &str = "ratexec=warn";

/// Initialise the global stderr subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(cli_level, env.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}' (from --log-level or {LOG_ENV})"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Pick the filter directive for this run.
///
/// A CLI level only raises or lowers ratexec's own events; an env directive
/// is used verbatim so it can target single modules or other crates.
pub fn filter_directive(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    let env = env.map(str::trim).filter(|s| !s.is_empty());

    match (cli_level, env) {
        (Some(lvl), _) => format!("ratexec={}", level_name(lvl)),
        (None, Some(directive)) => directive.to_string(),
        (None, None) => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn level_name(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
