//! Cross-context notification channel over `tokio::sync::broadcast`.
//!
//! One [`ChannelHub`] per storage domain. Each context registers once and
//! receives a publisher/feed pair tagged with a per-context origin id; the
//! feed filters out the context's own envelopes, so a writer never hears
//! its own notification. `send`/`try_recv` are plain synchronous calls; no
//! runtime is involved.

use livepoll_application::ports::{ChangeFeed, ChangePublisher, StateChange};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

/// Pending-notification buffer per context. A context that falls further
/// behind than this loses the oldest notifications (logged, then resumes).
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
struct Envelope {
    origin: u64,
    change: StateChange,
}

/// Fan-out hub for one storage domain.
#[derive(Clone)]
pub struct ChannelHub {
    tx: broadcast::Sender<Envelope>,
    next_origin: Arc<AtomicU64>,
}

impl ChannelHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            next_origin: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register one context, returning its sending and receiving halves.
    ///
    /// The feed only sees envelopes published after registration.
    pub fn register(&self) -> (BroadcastPublisher, BroadcastFeed) {
        let origin = self.next_origin.fetch_add(1, Ordering::Relaxed);
        let feed = BroadcastFeed {
            rx: self.tx.subscribe(),
            origin,
        };
        let publisher = BroadcastPublisher {
            tx: self.tx.clone(),
            origin,
        };
        (publisher, feed)
    }
}

impl Default for ChannelHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half for one context.
pub struct BroadcastPublisher {
    tx: broadcast::Sender<Envelope>,
    origin: u64,
}

impl ChangePublisher for BroadcastPublisher {
    fn publish(&self, change: StateChange) {
        // send only errors when no receiver exists; with nobody
        // listening there is nothing to deliver.
        let _ = self.tx.send(Envelope {
            origin: self.origin,
            change,
        });
    }
}

/// Receiving half for one context.
pub struct BroadcastFeed {
    rx: broadcast::Receiver<Envelope>,
    origin: u64,
}

impl ChangeFeed for BroadcastFeed {
    fn poll(&mut self) -> Vec<StateChange> {
        let mut pending = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(envelope) => {
                    if envelope.origin != self.origin {
                        pending.push(envelope.change);
                    }
                }
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("notification feed lagged, {missed} change(s) lost");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        pending
    }
}
