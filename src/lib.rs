// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod pipeline;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{PipelineConfig, RawPipelineConfig};
use crate::errors::Result;
use crate::exec::ProcessRunner;
use crate::pipeline::{Pipeline, RunSummary};

/// High-level entry point used by `main.rs`.
///
/// Validates the CLI settings, then runs the configured command once per
/// stdin line with real OS processes.
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    let config = PipelineConfig::try_from(RawPipelineConfig::from(&args))?;
    debug!(?config, "validated configuration");

    let pipeline = Pipeline::new(config, Arc::new(ProcessRunner::new()));
    pipeline.run(tokio::io::stdin()).await
}

/// The final report line, e.g. `1.502341s elapsed`.
pub fn elapsed_line(elapsed: Duration) -> String {
    format!("{elapsed:?} elapsed")
}
