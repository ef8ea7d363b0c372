//! Application layer for livepoll
//!
//! The core of the system: the live state synchronizer, the state codec,
//! the ports the infrastructure layer implements (store and notification
//! channel), the participant's VotedSet guard, and the admin/vote use
//! cases.
//!
//! # How shared state moves
//!
//! ```text
//! collaborator -> use_cases -> LiveState::mutate(f)
//!     -> codec::encode -> StateStore::set -> ChangePublisher::publish
//!         -> other contexts' ChangeFeed -> LiveState::pump
//!             -> codec::decode -> listeners re-render
//! ```
//!
//! The originating context applies its change synchronously and never
//! hears its own notification. Conflicting writers resolve
//! last-writer-wins at the store; see [`sync::LiveState`].

pub mod codec;
pub mod ports;
pub mod session;
pub mod sync;
pub mod use_cases;

// Re-export commonly used types
pub use codec::CodecError;
pub use ports::{ChangeFeed, ChangePublisher, StateChange, StateStore, StoreError};
pub use session::VotedSet;
pub use sync::{LiveState, questions_cache_key};
pub use use_cases::{VoteError, cast_vote};
