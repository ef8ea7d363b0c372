//! Cross-context change notification port.
//!
//! When one context persists a new value for a key, every *other* live
//! context sharing the storage domain receives a [`StateChange`] and feeds
//! it to its synchronizer. The originator never receives its own
//! notification; it already applied the change synchronously.
//!
//! Delivery is at-least-once within the storage domain; within one key,
//! notifications arrive in persisted write order. There is no cross-key
//! ordering guarantee.

/// Payload broadcast when a context persists a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Storage key that changed.
    pub key: String,
    /// The newly persisted (encoded) value.
    pub new_value: String,
}

/// Sending half owned by one context: announces this context's writes to
/// every other subscriber.
pub trait ChangePublisher: Send {
    /// Broadcast `change` to all other contexts. Infallible from the
    /// caller's perspective; a domain with no listeners simply drops it.
    fn publish(&self, change: StateChange);
}

/// Receiving half owned by one context: pending notifications from other
/// contexts, in the order their writes were persisted.
pub trait ChangeFeed: Send {
    /// Drain every notification that arrived since the last poll.
    ///
    /// Never blocks; returns an empty vec when nothing is pending. Own
    /// writes are already filtered out.
    fn poll(&mut self) -> Vec<StateChange>;
}
