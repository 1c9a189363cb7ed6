//! Shared helpers for ratexec's integration tests.
//!
//! - [`fake_runner::FakeRunner`] stands in for real processes.
//! - [`builders`] builds configs and in-memory input streams.
//! - [`run_lines`] runs a pipeline over a list of lines with a hang guard.

pub mod builders;
pub mod fake_runner;

use std::sync::{Arc, Once};
use std::time::Duration;

use ratexec::config::PipelineConfig;
use ratexec::errors::Result;
use ratexec::exec::CommandRunner;
use ratexec::logging::LOG_ENV;
use ratexec::pipeline::{Pipeline, RunSummary};
use tracing_subscriber::{EnvFilter, fmt};

use crate::builders::input_lines;

/// Upper bound for one pipeline run in tests. Generous because paused-clock
/// tests advance virtual time through every command delay.
pub const PIPELINE_DEADLINE: Duration = Duration::from_secs(120);

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Captured per test and only printed for failing ones. Unlike the binary,
/// the default shows ratexec's debug events so a failing test shows which
/// worker ran which line. `RATEXEC_LOG` overrides it, as for the binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = std::env::var(LOG_ENV)
            .ok()
            .and_then(|d| EnvFilter::try_new(d).ok())
            .unwrap_or_else(|| EnvFilter::new("ratexec=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Run `config` over `lines` with `runner`, panicking if the pipeline does
/// not finish within [`PIPELINE_DEADLINE`].
pub async fn run_lines<R, S>(
    config: PipelineConfig,
    runner: Arc<R>,
    lines: &[S],
) -> Result<RunSummary>
where
    R: CommandRunner + 'static,
    S: AsRef<str>,
{
    let run = Pipeline::new(config, runner).run(input_lines(lines));
    tokio::time::timeout(PIPELINE_DEADLINE, run)
        .await
        .expect("pipeline did not drain before the deadline")
}
