//! Infrastructure layer for livepoll
//!
//! Adapters behind the application layer's ports: store implementations
//! (shared in-memory origin store, durable JSON file store, per-context
//! session store), the broadcast notification channel, and configuration
//! loading for the CLI.

pub mod channel;
pub mod config;
pub mod store;

// Re-export commonly used types
pub use channel::{BroadcastFeed, BroadcastPublisher, ChannelHub};
pub use config::{ConfigLoader, PollConfig};
pub use store::{JsonFileStore, MemoryStore, SessionStore};
