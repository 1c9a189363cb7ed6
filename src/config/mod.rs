// src/config/mod.rs

//! Pipeline configuration.
//!
//! - [`RawPipelineConfig`] is what the CLI (or a library caller) hands in,
//!   unchecked.
//! - [`PipelineConfig`] is only obtainable through validation
//!   (`validate.rs`), so the rest of the crate can rely on a non-zero rate,
//!   a non-zero worker count and a usable command template.

pub mod validate;

use std::sync::Arc;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::exec::CommandTemplate;

/// Largest accepted `--rate`. Beyond this, `1s / rate` truncates to zero.
pub const MAX_RATE: u32 = 1_000_000_000;

/// Largest accepted `--inflight`.
pub const MAX_INFLIGHT: u32 = 65_536;

/// Unvalidated pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPipelineConfig {
    pub rate: u32,
    pub inflight: u32,
    pub command: Vec<String>,
}

impl Default for RawPipelineConfig {
    fn default() -> Self {
        Self {
            rate: 1,
            inflight: 1,
            command: Vec::new(),
        }
    }
}

impl From<&CliArgs> for RawPipelineConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            rate: args.rate,
            inflight: args.inflight,
            command: args.command.clone(),
        }
    }
}

/// Validated, immutable pipeline settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    rate: u32,
    inflight: usize,
    template: Arc<CommandTemplate>,
}

impl PipelineConfig {
    pub(crate) fn new_unchecked(rate: u32, inflight: usize, template: CommandTemplate) -> Self {
        Self {
            rate,
            inflight,
            template: Arc::new(template),
        }
    }

    /// Admissions per second.
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Number of workers, i.e. the maximum number of concurrent commands.
    pub fn inflight(&self) -> usize {
        self.inflight
    }

    /// Minimum gap between two admissions: `1s / rate`, truncated to
    /// nanoseconds.
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.rate
    }

    pub fn template(&self) -> &Arc<CommandTemplate> {
        &self.template
    }
}
