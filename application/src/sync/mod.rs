//! Live state synchronization across contexts.

pub mod live_state;

pub use live_state::{ChangeListener, LiveState, questions_cache_key};
