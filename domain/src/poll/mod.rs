//! Poll data model and state transitions.

pub mod defaults;
pub mod mutations;
pub mod question;
pub mod state;
pub mod votes;
