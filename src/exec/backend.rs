// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Workers talk to a `CommandRunner` instead of spawning processes directly.
//! This makes it easy to swap in a fake runner in tests (recording what
//! would have run, tracking how many run at once) while the production
//! implementation lives in [`task_runner`](super::task_runner).

use std::future::Future;
use std::pin::Pin;

use crate::exec::task_runner::run_invocation;
use crate::exec::{CommandOutcome, Invocation};

/// Trait abstracting how a rendered invocation is executed.
///
/// A single runner is shared by every worker, so implementations must be
/// usable from many tasks at once. The returned future must only resolve
/// once the command has finished: the pool relies on that to bound the
/// number of concurrent commands.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + '_>>;
}

/// Production runner: one OS process per invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + '_>> {
        Box::pin(async move { run_invocation(&invocation).await })
    }
}
