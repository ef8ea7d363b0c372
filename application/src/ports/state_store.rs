//! Key/value persistence port.
//!
//! The store is the sole source of truth at rest and the only resource
//! shared between contexts. Implementations live in the infrastructure
//! layer; the synchronizer only sees this trait.

use thiserror::Error;

/// Errors raised by a store adapter.
///
/// These never cross the synchronizer boundary: the synchronizer catches
/// them, logs, and keeps serving its in-memory state (best-effort
/// persistence, not guaranteed).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage write rejected: {0}")]
    WriteRejected(String),

    #[error("storage read failed: {0}")]
    ReadFailed(String),

    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous key/value store scoped to one storage domain.
///
/// `get` and `set` never suspend the caller. Failure is an expected
/// outcome (quota exhausted, backing medium unavailable) and is reported,
/// not panicked on.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
