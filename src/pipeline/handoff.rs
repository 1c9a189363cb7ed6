// src/pipeline/handoff.rs

//! Rendezvous handoff between pipeline stages.
//!
//! `HandoffSender::send` only returns once a consumer has actually taken the
//! item, so a producer can never run more than one item ahead of whoever is
//! consuming. Tokio has no zero-capacity channel, so this is a capacity-1
//! `mpsc` channel whose envelopes carry a `oneshot` acknowledgement.
//!
//! The receiving side is `Clone` and may be shared by many consumers; each
//! item is delivered to exactly one of them. Waiting consumers are served in
//! the order they started waiting.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, oneshot};

struct Envelope<T> {
    item: T,
    taken: oneshot::Sender<()>,
}

/// Returned by [`HandoffSender::send`] when every receiver is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandoffClosed;

impl fmt::Display for HandoffClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("handoff receiver closed")
    }
}

impl std::error::Error for HandoffClosed {}

/// Producer half. Dropping it closes the handoff once any in-flight item
/// has been taken.
pub struct HandoffSender<T> {
    tx: mpsc::Sender<Envelope<T>>,
}

/// Consumer half, shareable between several consumers.
pub struct HandoffReceiver<T> {
    rx: Arc<Mutex<mpsc::Receiver<Envelope<T>>>>,
}

impl<T> Clone for HandoffReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

/// Create a new rendezvous handoff.
pub fn handoff<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (
        HandoffSender { tx },
        HandoffReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

impl<T> HandoffSender<T> {
    /// Hand `item` to a consumer, waiting until one has taken it.
    pub async fn send(&self, item: T) -> Result<(), HandoffClosed> {
        let (taken_tx, taken_rx) = oneshot::channel();

        self.tx
            .send(Envelope {
                item,
                taken: taken_tx,
            })
            .await
            .map_err(|_| HandoffClosed)?;

        // The ack sender is dropped unacknowledged only when the receiving
        // side went away with the envelope still queued.
        taken_rx.await.map_err(|_| HandoffClosed)
    }
}

impl<T> HandoffReceiver<T> {
    /// Take the next item, or `None` once the sender is gone and nothing is
    /// left.
    pub async fn recv(&self) -> Option<T> {
        let envelope = {
            let mut rx = self.rx.lock().await;
            rx.recv().await?
        };

        // The producer may have been dropped while waiting; the item is
        // still ours.
        let _ = envelope.taken.send(());
        Some(envelope.item)
    }
}
