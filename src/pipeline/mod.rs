// src/pipeline/mod.rs

//! The line → rate limiter → worker pool pipeline.
//!
//! - [`line_source`] reads the input stream and hands lines on one at a time.
//! - [`limiter`] re-emits them in order, at most `rate` per second.
//! - [`worker`] runs `inflight` workers pulling from the limiter's output.
//! - [`barrier`] waits until every worker has drained the input.
//!
//! Stages are connected by [`handoff`] channels, which only complete a send
//! once the item was taken. That is the only backpressure there is: the line
//! source cannot outrun the limiter, and the limiter cannot outrun the next
//! ready worker.

pub mod barrier;
pub mod handoff;
pub mod limiter;
pub mod line_source;
pub mod worker;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncRead;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::exec::CommandRunner;

pub use barrier::CompletionBarrier;
pub use handoff::{HandoffClosed, HandoffReceiver, HandoffSender, handoff};
pub use limiter::{RateLimiter, spawn_rate_limiter};
pub use line_source::spawn_line_source;
pub use worker::{Worker, WorkerReport, WorkerState};

/// Totals for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    pub admitted: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub workers: usize,
}

impl RunSummary {
    pub fn dispatched(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// One configured pipeline, ready to consume an input stream.
pub struct Pipeline<R: CommandRunner + ?Sized> {
    config: PipelineConfig,
    runner: Arc<R>,
}

impl<R> Pipeline<R>
where
    R: CommandRunner + ?Sized + 'static,
{
    pub fn new(config: PipelineConfig, runner: Arc<R>) -> Self {
        Self { config, runner }
    }

    /// Run every line of `input` through the configured command.
    ///
    /// Returns after all workers have finished, i.e. after every admitted
    /// line's command exited. Command failures are counted, never returned.
    /// A read error on `input` is returned as `InputError`, but only after
    /// the lines read before it have been run.
    pub async fn run<I>(self, input: I) -> Result<RunSummary>
    where
        I: AsyncRead + Unpin + Send + 'static,
    {
        let inflight = self.config.inflight();

        info!(
            rate = self.config.rate(),
            inflight,
            program = %self.config.template().program(),
            "starting pipeline"
        );

        let (lines, source) = spawn_line_source(input);
        let (paced, limiter) =
            spawn_rate_limiter(RateLimiter::per_second(self.config.rate()), lines);

        let mut barrier = CompletionBarrier::new();
        for id in 0..inflight {
            let worker = Worker::new(
                id,
                Arc::clone(self.config.template()),
                paced.clone(),
                Arc::clone(&self.runner),
            );
            barrier.spawn(worker.run());
        }
        // Workers hold the only remaining receivers.
        drop(paced);

        let reports = barrier.wait().await;

        let admitted = limiter.await.context("rate limiter task failed")?;
        let lines_read = source.await.context("line source task failed")??;

        let summary = RunSummary {
            lines_read,
            admitted,
            succeeded: reports.iter().map(|r| r.succeeded).sum(),
            failed: reports.iter().map(|r| r.failed).sum(),
            workers: reports.len(),
        };

        if summary.failed > 0 {
            warn!(
                failed = summary.failed,
                dispatched = summary.dispatched(),
                "some commands failed"
            );
        }
        info!(
            lines = summary.lines_read,
            admitted = summary.admitted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "pipeline finished"
        );

        Ok(summary)
    }
}
