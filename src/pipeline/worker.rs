// src/pipeline/worker.rs

//! Worker pool members.
//!
//! Each worker loops: pull a line, render the template, run the command,
//! wait for it, pull again. One command per worker at a time, so the number
//! of workers is the concurrency cap.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::exec::{CommandOutcome, CommandRunner, CommandTemplate};

use super::handoff::HandoffReceiver;

/// Per-worker lifecycle.
///
/// ```text
/// Idle -> Pulling -> Done
///            |
///            +-> Rendering -> Executing -> Pulling
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Pulling,
    Rendering,
    Executing,
    Done,
}

impl WorkerState {
    /// Whether moving from `self` to `next` is a legal step.
    pub fn can_transition_to(self, next: WorkerState) -> bool {
        use WorkerState::*;
        matches!(
            (self, next),
            (Idle, Pulling)
                | (Pulling, Rendering)
                | (Pulling, Done)
                | (Rendering, Executing)
                | (Executing, Pulling)
        )
    }
}

/// What one worker did before the input ran dry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub dispatched: u64,
    pub succeeded: u64,
    pub failed: u64,
}

pub struct Worker<R: CommandRunner + ?Sized> {
    id: usize,
    state: WorkerState,
    template: Arc<CommandTemplate>,
    input: HandoffReceiver<String>,
    runner: Arc<R>,
}

impl<R: CommandRunner + ?Sized> Worker<R> {
    pub fn new(
        id: usize,
        template: Arc<CommandTemplate>,
        input: HandoffReceiver<String>,
        runner: Arc<R>,
    ) -> Self {
        Self {
            id,
            state: WorkerState::Idle,
            template,
            input,
            runner,
        }
    }

    fn enter(&mut self, next: WorkerState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal worker transition {:?} -> {:?}",
            self.state,
            next
        );
        trace!(worker = self.id, from = ?self.state, to = ?next, "worker state");
        self.state = next;
    }

    /// Run until the shared input is exhausted.
    pub async fn run(mut self) -> WorkerReport {
        let mut report = WorkerReport {
            worker: self.id,
            ..WorkerReport::default()
        };

        debug!(worker = self.id, "worker started");

        loop {
            self.enter(WorkerState::Pulling);
            let Some(line) = self.input.recv().await else {
                self.enter(WorkerState::Done);
                break;
            };

            self.enter(WorkerState::Rendering);
            let invocation = self.template.render(&line);

            self.enter(WorkerState::Executing);
            debug!(worker = self.id, line = %line, cmd = %invocation, "dispatching command");
            report.dispatched += 1;

            match self.runner.run(invocation).await {
                CommandOutcome::Success => report.succeeded += 1,
                outcome => {
                    debug!(worker = self.id, line = %line, ?outcome, "command did not succeed");
                    report.failed += 1;
                }
            }
        }

        debug!(
            worker = self.id,
            dispatched = report.dispatched,
            failed = report.failed,
            "worker finished"
        );
        report
    }
}
