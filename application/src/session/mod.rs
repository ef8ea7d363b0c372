//! Per-context session state (never shared between contexts).

pub mod voted_set;

pub use voted_set::VotedSet;
