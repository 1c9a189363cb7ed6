// src/exec/mod.rs

//! Command execution layer.
//!
//! - [`template`] turns a command template plus one input line into a
//!   concrete [`Invocation`].
//! - [`task_runner`] runs a single invocation as an OS process via
//!   `tokio::process::Command` and reports a [`CommandOutcome`].
//! - [`backend`] provides the `CommandRunner` trait the worker pool talks to,
//!   and `ProcessRunner`, the production implementation. Tests swap in a fake
//!   runner that never spawns anything.

pub mod backend;
pub mod task_runner;
pub mod template;

pub use backend::{CommandRunner, ProcessRunner};
pub use template::{CommandTemplate, Invocation, PLACEHOLDER};

/// How a single command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exited with status 0.
    Success,
    /// Exited non-zero. Termination by signal is reported as `-1`.
    Failed(i32),
    /// The process could not be started at all (e.g. executable not found).
    SpawnFailed,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }
}
