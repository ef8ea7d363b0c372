//! Ports (output interfaces) implemented by the infrastructure layer.

pub mod change_channel;
pub mod state_store;

pub use change_channel::{ChangeFeed, ChangePublisher, StateChange};
pub use state_store::{StateStore, StoreError};
