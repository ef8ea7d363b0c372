//! Notification channel adapters implementing the application's change
//! fan-out ports.

pub mod broadcast;

pub use broadcast::{BroadcastFeed, BroadcastPublisher, ChannelHub};
