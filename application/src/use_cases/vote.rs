//! Participant vote casting.

use crate::session::VotedSet;
use crate::sync::LiveState;
use livepoll_domain::{DomainError, OptionId, QuestionId, mutations};
use thiserror::Error;

/// Why a vote was rejected. State is unchanged in every case.
#[derive(Error, Debug)]
pub enum VoteError {
    #[error("this participant has already voted on question {0}")]
    AlreadyVoted(QuestionId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Cast one vote for `option_id` on the current question.
///
/// The context's own [`VotedSet`] is consulted first: repeated attempts on
/// a question this participant already voted on are rejected locally,
/// before any shared-state mutation. On success the question id is
/// recorded into the VotedSet, and only then, so a rejected mutate never
/// locks the participant out.
pub fn cast_vote(
    live: &mut LiveState,
    voted: &mut VotedSet,
    question_id: &QuestionId,
    option_id: &OptionId,
) -> Result<(), VoteError> {
    if voted.contains(question_id) {
        return Err(VoteError::AlreadyVoted(question_id.clone()));
    }
    live.try_mutate(|state| mutations::cast_vote(state, question_id, option_id))?;
    voted.record(question_id.clone());
    Ok(())
}
