//! Administrator operations over the shared poll state.
//!
//! Thin wrappers that drive [`LiveState`] with the pure domain
//! transitions. They carry no policy of their own beyond what the domain
//! enforces; confirmation prompts for destructive operations belong to
//! the caller.

use crate::sync::LiveState;
use livepoll_domain::{Direction, DomainError, Question, QuestionId, mutations};

/// Move the currently displayed question one step forward or backward.
/// Clamped; a no-op at either boundary.
pub fn advance_question(live: &mut LiveState, direction: Direction) {
    live.mutate(|state| mutations::advance_question(state, direction));
}

/// Replace the whole session with a freshly generated default state.
///
/// Destructive. Callers must confirm with the operator before invoking.
pub fn reset_session(live: &mut LiveState) {
    live.mutate(|_| mutations::reset_session());
}

/// Save a question (replace by id, or append) and reconcile the vote
/// table.
pub fn save_question(live: &mut LiveState, question: Question) -> Result<(), DomainError> {
    live.try_mutate(move |state| mutations::save_question(state, question))
}

/// Delete a question and clamp the current index back into range.
pub fn delete_question(live: &mut LiveState, id: &QuestionId) -> Result<(), DomainError> {
    live.try_mutate(|state| mutations::delete_question(state, id))
}
