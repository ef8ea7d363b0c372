//! Domain error types

use crate::poll::question::{OptionId, QuestionId};
use thiserror::Error;

/// Domain-level errors
///
/// Every variant represents a rejected state transition; the state the
/// caller holds is left untouched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("question text cannot be empty")]
    EmptyQuestionText,

    #[error("a question needs at least two non-empty options, got {got}")]
    TooFewOptions { got: usize },

    #[error("duplicate option id within question: {0}")]
    DuplicateOptionId(OptionId),

    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),

    #[error("question {0} is not the currently displayed question")]
    NotCurrentQuestion(QuestionId),

    #[error("option {option} does not belong to question {question}")]
    UnknownOption {
        question: QuestionId,
        option: OptionId,
    },

    #[error("state invariant violated: {0}")]
    InvalidState(String),
}

impl DomainError {
    /// Check whether this error rejects a vote against a non-current question
    pub fn is_stale_vote(&self) -> bool {
        matches!(self, DomainError::NotCurrentQuestion(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_options_display() {
        let error = DomainError::TooFewOptions { got: 1 };
        assert_eq!(
            error.to_string(),
            "a question needs at least two non-empty options, got 1"
        );
    }

    #[test]
    fn test_is_stale_vote_check() {
        assert!(DomainError::NotCurrentQuestion(QuestionId::new("q2")).is_stale_vote());
        assert!(!DomainError::EmptyQuestionText.is_stale_vote());
    }
}
