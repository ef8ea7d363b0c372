//! Pure state transitions over [`AppState`].
//!
//! Every function takes the caller's current snapshot by reference and
//! returns a new value; nothing mutates shared structures in place. The
//! synchronizer applies these through its read-modify-write primitive, so
//! the snapshot a transition sees is always the latest one its own context
//! holds (which may still be stale relative to other contexts; that race
//! is resolved last-writer-wins at the store).

use crate::error::DomainError;
use crate::poll::question::{OptionId, Question, QuestionId};
use crate::poll::state::AppState;

/// Which way to move the currently displayed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Move the current question forward or backward, clamped to
/// `[0, questions.len() - 1]`. A no-op at either boundary and on an empty
/// question list.
pub fn advance_question(state: &AppState, direction: Direction) -> AppState {
    let mut next = state.clone();
    if next.questions.is_empty() {
        return next;
    }
    next.current_question_index = match direction {
        Direction::Forward => (state.current_question_index + 1).min(next.questions.len() - 1),
        Direction::Backward => state.current_question_index.saturating_sub(1),
    };
    next
}

/// Replace everything with a freshly generated default state.
///
/// Destructive; confirming with the operator is the caller's job.
pub fn reset_session() -> AppState {
    AppState::initial()
}

/// Save a question: replace in place when the id already exists (position
/// preserved), append otherwise.
///
/// The question is normalized (trimmed text, blank options dropped) and
/// validated before anything changes. After the list changes the vote
/// table is reconciled so that surviving (question, option) pairs keep
/// their counts and everything else starts at zero.
pub fn save_question(state: &AppState, question: Question) -> Result<AppState, DomainError> {
    let question = question.normalized();
    question.validate()?;

    let mut questions = state.questions.clone();
    match questions.iter().position(|q| q.id == question.id) {
        Some(index) => questions[index] = question,
        None => questions.push(question),
    }

    let votes = state.votes.reconciled_for(&questions);
    Ok(AppState {
        questions,
        current_question_index: state.current_question_index,
        votes,
    })
}

/// Delete a question, drop its vote entry, and clamp the current index
/// back into range (last valid index, or 0 when the list empties).
pub fn delete_question(state: &AppState, id: &QuestionId) -> Result<AppState, DomainError> {
    if !state.questions.iter().any(|q| &q.id == id) {
        return Err(DomainError::UnknownQuestion(id.clone()));
    }

    let questions: Vec<Question> = state
        .questions
        .iter()
        .filter(|q| &q.id != id)
        .cloned()
        .collect();

    let mut votes = state.votes.clone();
    votes.remove_question(id);

    let current_question_index = if state.current_question_index >= questions.len() {
        questions.len().saturating_sub(1)
    } else {
        state.current_question_index
    };

    Ok(AppState {
        questions,
        current_question_index,
        votes,
    })
}

/// Cast one vote for `option_id` on the currently displayed question.
///
/// `question_id` must match the current question (a vote against a
/// question that has since moved on is a caller error, signaled rather
/// than silently dropped) and `option_id` must belong to it.
pub fn cast_vote(
    state: &AppState,
    question_id: &QuestionId,
    option_id: &OptionId,
) -> Result<AppState, DomainError> {
    let Some(current) = state.current_question() else {
        return Err(DomainError::NotCurrentQuestion(question_id.clone()));
    };
    if &current.id != question_id {
        return Err(DomainError::NotCurrentQuestion(question_id.clone()));
    }
    if !current.has_option(option_id) {
        return Err(DomainError::UnknownOption {
            question: question_id.clone(),
            option: option_id.clone(),
        });
    }

    let mut next = state.clone();
    next.votes.increment(question_id, option_id);
    Ok(next)
}
