//! Use cases: the operations the admin and participant surfaces invoke.

pub mod admin;
pub mod vote;

pub use vote::{VoteError, cast_vote};
