// src/pipeline/limiter.rs

//! Second pipeline stage: strict pacing of admissions.
//!
//! The first item is forwarded as soon as it arrives. Every later item waits
//! for a ticker that is restarted each time an item is taken downstream, so
//! consecutive admissions are always at least one period apart. There is no
//! burst allowance: idle time never earns credit.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, trace};

use super::handoff::{HandoffReceiver, HandoffSender, handoff};

/// Paces items flowing from one handoff to another.
#[derive(Debug)]
pub struct RateLimiter {
    period: Duration,
    ticker: Option<Interval>,
}

impl RateLimiter {
    /// Create a limiter admitting `rate` items per second.
    ///
    /// `rate` must be non-zero; validated configs guarantee it.
    pub fn per_second(rate: u32) -> Self {
        Self::with_period(Duration::from_secs(1) / rate)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            ticker: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait until the next admission is allowed. Returns immediately before
    /// the first admission.
    async fn ready(&mut self) {
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.tick().await;
        }
    }

    /// Record that an item was just admitted; the next one may follow no
    /// earlier than one period from now.
    fn admitted(&mut self) {
        // A zero period means "unpaced"; tokio intervals reject it.
        if self.period.is_zero() {
            return;
        }
        match self.ticker.as_mut() {
            Some(ticker) => ticker.reset(),
            None => {
                let mut ticker = interval_at(Instant::now() + self.period, self.period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
            }
        }
    }

    /// Forward every item from `input` to `output` in order, paced.
    ///
    /// Returns the number of items admitted. `output` is dropped on return,
    /// which closes it for downstream consumers.
    pub async fn forward<T>(mut self, input: HandoffReceiver<T>, output: HandoffSender<T>) -> u64 {
        let mut admitted: u64 = 0;

        while let Some(item) = input.recv().await {
            self.ready().await;

            if output.send(item).await.is_err() {
                debug!(admitted, "no consumers left; stopping rate limiter");
                return admitted;
            }

            self.admitted();
            admitted += 1;
            trace!(admitted, "item admitted");
        }

        debug!(admitted, "input closed; rate limiter finished");
        admitted
    }
}

/// Spawn a rate limiter over `input` and return its paced output together
/// with a handle resolving to the number of admitted items.
pub fn spawn_rate_limiter<T>(
    limiter: RateLimiter,
    input: HandoffReceiver<T>,
) -> (HandoffReceiver<T>, JoinHandle<u64>)
where
    T: Send + 'static,
{
    let (tx, rx) = handoff();
    debug!(period = ?limiter.period(), "starting rate limiter");
    let handle = tokio::spawn(limiter.forward(input, tx));
    (rx, handle)
}
