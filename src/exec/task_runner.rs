// src/exec/task_runner.rs

//! Single command process runner.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::exec::{CommandOutcome, Invocation};

/// Run one invocation to completion.
///
/// The child's stdout is inherited, so all commands share this process's
/// stdout unmultiplexed. Its stdin and stderr are connected to the null
/// device. Spawn and wait failures are reported as outcomes, never as
/// errors: the caller keeps going either way. Per-command results are only
/// logged at debug; a command's failure shows through its own output.
pub async fn run_invocation(invocation: &Invocation) -> CommandOutcome {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            debug!(
                cmd = %invocation,
                error = %e,
                "failed to spawn command"
            );
            return CommandOutcome::SpawnFailed;
        }
    };

    debug!(cmd = %invocation, pid = child.id(), "command started");

    match child.wait().await {
        Ok(status) if status.success() => {
            debug!(cmd = %invocation, "command exited successfully");
            CommandOutcome::Success
        }
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            debug!(
                cmd = %invocation,
                exit_code = code,
                "command exited with failure"
            );
            CommandOutcome::Failed(code)
        }
        Err(e) => {
            debug!(
                cmd = %invocation,
                error = %e,
                "failed waiting for command"
            );
            CommandOutcome::Failed(-1)
        }
    }
}
