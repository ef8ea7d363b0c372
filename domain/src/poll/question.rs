//! Poll questions and their answer options.

use crate::error::DomainError;
use crate::util::pseudo_uuid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for a question, stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a QuestionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh unique QuestionId.
    pub fn generate() -> Self {
        Self(format!("q-{}", pseudo_uuid()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an option within its question.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionId(String);

impl OptionId {
    /// Creates an OptionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh unique OptionId.
    pub fn generate() -> Self {
        Self(format!("o-{}", pseudo_uuid()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: OptionId,
    pub text: String,
}

impl PollOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(id),
            text: text.into(),
        }
    }
}

/// A poll question with its ordered answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<PollOption>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, options: Vec<PollOption>) -> Self {
        Self {
            id: QuestionId::new(id),
            text: text.into(),
            options,
        }
    }

    /// Whether `option_id` belongs to this question.
    pub fn has_option(&self, option_id: &OptionId) -> bool {
        self.options.iter().any(|o| &o.id == option_id)
    }

    /// Trim the question text and drop options whose text is blank.
    ///
    /// Mirrors what the question editor submits: whitespace-only options do
    /// not survive a save.
    pub fn normalized(mut self) -> Self {
        self.text = self.text.trim().to_string();
        self.options.retain(|o| !o.text.trim().is_empty());
        for option in &mut self.options {
            option.text = option.text.trim().to_string();
        }
        self
    }

    /// Validate a question for saving: non-empty text, at least two
    /// non-empty options, option ids unique within the question.
    ///
    /// Expects a normalized question; blank options still present count
    /// against the caller.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text.trim().is_empty() {
            return Err(DomainError::EmptyQuestionText);
        }
        let non_empty = self.options.iter().filter(|o| !o.text.trim().is_empty()).count();
        if non_empty < 2 {
            return Err(DomainError::TooFewOptions { got: non_empty });
        }
        let mut seen = BTreeSet::new();
        for option in &self.options {
            if !seen.insert(&option.id) {
                return Err(DomainError::DuplicateOptionId(option.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: Vec<PollOption>) -> Question {
        Question::new("q1", "Pick one", options)
    }

    #[test]
    fn test_has_option() {
        let q = question(vec![
            PollOption::new("q1o1", "A"),
            PollOption::new("q1o2", "B"),
        ]);
        assert!(q.has_option(&OptionId::new("q1o1")));
        assert!(!q.has_option(&OptionId::new("q9o9")));
    }

    #[test]
    fn test_normalized_drops_blank_options() {
        let q = question(vec![
            PollOption::new("q1o1", "  A "),
            PollOption::new("q1o2", "   "),
            PollOption::new("q1o3", "B"),
        ])
        .normalized();
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.options[0].text, "A");
    }

    #[test]
    fn test_validate_rejects_empty_text() {
        let q = Question::new(
            "q1",
            "   ",
            vec![PollOption::new("a", "A"), PollOption::new("b", "B")],
        );
        assert_eq!(q.validate(), Err(DomainError::EmptyQuestionText));
    }

    #[test]
    fn test_validate_rejects_single_option() {
        let q = question(vec![PollOption::new("q1o1", "A")]);
        assert_eq!(q.validate(), Err(DomainError::TooFewOptions { got: 1 }));
    }

    #[test]
    fn test_validate_rejects_duplicate_option_ids() {
        let q = question(vec![
            PollOption::new("dup", "A"),
            PollOption::new("dup", "B"),
        ]);
        assert_eq!(
            q.validate(),
            Err(DomainError::DuplicateOptionId(OptionId::new("dup")))
        );
    }

    #[test]
    fn test_validate_accepts_two_options() {
        let q = question(vec![
            PollOption::new("q1o1", "A"),
            PollOption::new("q1o2", "B"),
        ]);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_generated_ids_are_prefixed() {
        assert!(QuestionId::generate().as_str().starts_with("q-"));
        assert!(OptionId::generate().as_str().starts_with("o-"));
    }
}
