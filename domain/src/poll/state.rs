//! The shared application state.

use crate::error::DomainError;
use crate::poll::defaults::default_questions;
use crate::poll::question::Question;
use crate::poll::votes::VoteTable;
use serde::{Deserialize, Serialize};

/// The single unit of shared, persisted, cross-context state.
///
/// One logical owner (the origin-scoped store), many concurrent writers.
/// Mutations go through the pure transitions in [`crate::poll::mutations`];
/// nothing here is updated in place by collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub questions: Vec<Question>,
    pub current_question_index: usize,
    pub votes: VoteTable,
}

impl AppState {
    /// The state a fresh session starts with: default questions, zeroed
    /// vote table, first question displayed.
    pub fn initial() -> Self {
        let questions = default_questions();
        let votes = VoteTable::seeded_for(&questions);
        Self {
            questions,
            current_question_index: 0,
            votes,
        }
    }

    /// The currently displayed question, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    /// Check the cross-field invariants.
    ///
    /// Used by the codec to reject decoded states that are well-formed JSON
    /// but inconsistent: an out-of-range index, or a vote table whose key
    /// set has drifted from the question list.
    pub fn validate(&self) -> Result<(), DomainError> {
        let upper = self.questions.len().max(1);
        if self.current_question_index >= upper {
            return Err(DomainError::InvalidState(format!(
                "current_question_index {} out of range for {} question(s)",
                self.current_question_index,
                self.questions.len()
            )));
        }
        if !self.votes.matches_questions(&self.questions) {
            return Err(DomainError::InvalidState(
                "vote table does not match the question list".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::initial()
    }
}
