use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ratexec::exec::{CommandOutcome, CommandRunner, Invocation};

/// A fake command runner that:
/// - records every invocation it was asked to run, in start order
/// - tracks how many invocations are running right now and the peak
/// - optionally "runs" for a fixed delay (tokio time, so paused clocks work)
/// - reports `Failed(1)` for invocations whose arguments contain a marker
#[derive(Default)]
pub struct FakeRunner {
    delay: Duration,
    fail_marker: Option<String>,
    executed: Arc<Mutex<Vec<Invocation>>>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    pub fn executed(&self) -> Vec<Invocation> {
        self.executed.lock().unwrap().clone()
    }

    /// First argument of every executed invocation, in start order.
    pub fn executed_first_args(&self) -> Vec<String> {
        self.executed()
            .into_iter()
            .filter_map(|inv| inv.args.into_iter().next())
            .collect()
    }

    pub fn running(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + '_>> {
        Box::pin(async move {
            let now_running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now_running, Ordering::SeqCst);

            let fails = self
                .fail_marker
                .as_deref()
                .is_some_and(|m| invocation.args.iter().any(|a| a.contains(m)));

            {
                let mut guard = self.executed.lock().unwrap();
                guard.push(invocation);
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.running.fetch_sub(1, Ordering::SeqCst);

            if fails {
                CommandOutcome::Failed(1)
            } else {
                CommandOutcome::Success
            }
        })
    }
}
