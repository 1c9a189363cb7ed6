// src/pipeline/barrier.rs

use std::future::Future;

use tokio::task::JoinSet;
use tracing::error;

/// Completion barrier over a fixed set of worker tasks.
///
/// Each [`spawn`](Self::spawn) registers one member; a member leaves the
/// barrier when its task returns. [`wait`](Self::wait) resolves once every
/// member has left and yields their results. There is no timeout.
#[derive(Debug)]
pub struct CompletionBarrier<T> {
    members: JoinSet<T>,
}

impl<T: Send + 'static> CompletionBarrier<T> {
    pub fn new() -> Self {
        Self {
            members: JoinSet::new(),
        }
    }

    /// Register and start one member.
    pub fn spawn<F>(&mut self, member: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.members.spawn(member);
    }

    /// Members that have not returned (or not been collected) yet.
    pub fn pending(&self) -> usize {
        self.members.len()
    }

    /// Block until every member has returned.
    ///
    /// A member that panicked is logged and left out of the results; the
    /// others are still waited for.
    pub async fn wait(mut self) -> Vec<T> {
        let mut results = Vec::with_capacity(self.members.len());

        while let Some(joined) = self.members.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => error!(error = %e, "pipeline worker did not finish cleanly"),
            }
        }

        results
    }
}

impl<T: Send + 'static> Default for CompletionBarrier<T> {
    fn default() -> Self {
        Self::new()
    }
}
