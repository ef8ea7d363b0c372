//! Domain layer for livepoll
//!
//! This crate contains the poll data model and the pure state transitions
//! over it. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## AppState
//!
//! The single shared record of questions, current question index, and vote
//! tallies. All contexts (independent running instances sharing one
//! storage domain) read and write the same AppState; the synchronizer in
//! the application layer moves it between memory and the store.
//!
//! ## Transitions, not setters
//!
//! Shared state only changes through the pure functions in
//! [`poll::mutations`]: each one maps an old AppState value to a new one.
//! Validation failures reject the transition and leave the input untouched.

pub mod error;
pub mod poll;
pub mod util;

// Re-export commonly used types
pub use error::DomainError;
pub use poll::mutations;
pub use poll::defaults::default_questions;
pub use poll::mutations::{
    Direction, advance_question, cast_vote, delete_question, reset_session, save_question,
};
pub use poll::question::{OptionId, PollOption, Question, QuestionId};
pub use poll::state::AppState;
pub use poll::votes::VoteTable;
