//! Per-option vote tallies.
//!
//! The [`VoteTable`] maps question id → option id → count. Its key set is
//! kept in lockstep with the question list: every question-list mutation
//! rebuilds the table via [`VoteTable::reconciled_for`], carrying over the
//! counts of (question, option) pairs that survive the edit and zeroing
//! everything else. Counts never reference an id absent from the list.

use crate::poll::question::{OptionId, Question, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vote counts keyed by question id, then option id.
///
/// `BTreeMap` keeps the encoded form canonical: the same table always
/// serializes to the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTable(BTreeMap<QuestionId, BTreeMap<OptionId, u64>>);

impl VoteTable {
    /// A table with a zeroed entry for every option of every question.
    pub fn seeded_for(questions: &[Question]) -> Self {
        let mut table = BTreeMap::new();
        for question in questions {
            let counts = question
                .options
                .iter()
                .map(|o| (o.id.clone(), 0))
                .collect();
            table.insert(question.id.clone(), counts);
        }
        Self(table)
    }

    /// Rebuild the table for a changed question list.
    ///
    /// Pairs present both in `self` and in the new list keep their counts;
    /// new pairs start at zero; pairs no longer in the list are dropped.
    pub fn reconciled_for(&self, questions: &[Question]) -> Self {
        let mut next = Self::seeded_for(questions);
        for (question_id, counts) in &mut next.0 {
            let Some(old_counts) = self.0.get(question_id) else {
                continue;
            };
            for (option_id, count) in counts.iter_mut() {
                if let Some(old) = old_counts.get(option_id) {
                    *count = *old;
                }
            }
        }
        next
    }

    /// Count for one (question, option) pair, zero if absent.
    pub fn count(&self, question_id: &QuestionId, option_id: &OptionId) -> u64 {
        self.0
            .get(question_id)
            .and_then(|counts| counts.get(option_id))
            .copied()
            .unwrap_or(0)
    }

    /// All per-option counts for one question.
    pub fn counts_for(&self, question_id: &QuestionId) -> Option<&BTreeMap<OptionId, u64>> {
        self.0.get(question_id)
    }

    /// Total votes cast on one question.
    pub fn question_total(&self, question_id: &QuestionId) -> u64 {
        self.0
            .get(question_id)
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }

    /// Add one vote to an existing (question, option) entry.
    ///
    /// Missing entries are not created here; [`cast_vote`] validates
    /// membership first, and reconciliation guarantees the entry exists.
    ///
    /// [`cast_vote`]: crate::poll::mutations::cast_vote
    pub fn increment(&mut self, question_id: &QuestionId, option_id: &OptionId) {
        if let Some(counts) = self.0.get_mut(question_id)
            && let Some(count) = counts.get_mut(option_id)
        {
            *count += 1;
        }
    }

    /// Drop one question's entry entirely.
    pub fn remove_question(&mut self, question_id: &QuestionId) {
        self.0.remove(question_id);
    }

    /// Whether the table's key set is exactly `{(q.id, o.id)}` over `questions`.
    pub fn matches_questions(&self, questions: &[Question]) -> bool {
        if self.0.len() != questions.len() {
            return false;
        }
        questions.iter().all(|question| {
            self.0.get(&question.id).is_some_and(|counts| {
                counts.len() == question.options.len()
                    && question.options.iter().all(|o| counts.contains_key(&o.id))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::question::PollOption;

    fn questions() -> Vec<Question> {
        vec![
            Question::new(
                "q1",
                "First",
                vec![PollOption::new("q1o1", "A"), PollOption::new("q1o2", "B")],
            ),
            Question::new(
                "q2",
                "Second",
                vec![PollOption::new("q2o1", "X"), PollOption::new("q2o2", "Y")],
            ),
        ]
    }

    #[test]
    fn test_seeded_table_is_zeroed_and_complete() {
        let qs = questions();
        let table = VoteTable::seeded_for(&qs);
        assert!(table.matches_questions(&qs));
        assert_eq!(table.count(&QuestionId::new("q1"), &OptionId::new("q1o1")), 0);
        assert_eq!(table.question_total(&QuestionId::new("q2")), 0);
    }

    #[test]
    fn test_increment_only_touches_existing_entries() {
        let qs = questions();
        let mut table = VoteTable::seeded_for(&qs);
        table.increment(&QuestionId::new("q1"), &OptionId::new("q1o1"));
        table.increment(&QuestionId::new("q1"), &OptionId::new("nope"));
        table.increment(&QuestionId::new("nope"), &OptionId::new("q1o1"));
        assert_eq!(table.count(&QuestionId::new("q1"), &OptionId::new("q1o1")), 1);
        assert_eq!(table.question_total(&QuestionId::new("q1")), 1);
        assert!(table.matches_questions(&qs));
    }

    #[test]
    fn test_reconciled_carries_surviving_counts() {
        let qs = questions();
        let mut table = VoteTable::seeded_for(&qs);
        table.increment(&QuestionId::new("q1"), &OptionId::new("q1o1"));
        table.increment(&QuestionId::new("q1"), &OptionId::new("q1o2"));
        table.increment(&QuestionId::new("q2"), &OptionId::new("q2o1"));

        // q1 keeps option q1o1, replaces q1o2 with q1o3; q2 is untouched.
        let edited = vec![
            Question::new(
                "q1",
                "First (edited)",
                vec![PollOption::new("q1o1", "A"), PollOption::new("q1o3", "C")],
            ),
            qs[1].clone(),
        ];
        let next = table.reconciled_for(&edited);

        assert!(next.matches_questions(&edited));
        assert_eq!(next.count(&QuestionId::new("q1"), &OptionId::new("q1o1")), 1);
        assert_eq!(next.count(&QuestionId::new("q1"), &OptionId::new("q1o3")), 0);
        assert_eq!(next.count(&QuestionId::new("q1"), &OptionId::new("q1o2")), 0);
        assert_eq!(next.count(&QuestionId::new("q2"), &OptionId::new("q2o1")), 1);
    }

    #[test]
    fn test_reconciled_drops_removed_questions() {
        let qs = questions();
        let mut table = VoteTable::seeded_for(&qs);
        table.increment(&QuestionId::new("q2"), &OptionId::new("q2o2"));

        let only_q1 = vec![qs[0].clone()];
        let next = table.reconciled_for(&only_q1);
        assert!(next.matches_questions(&only_q1));
        assert!(next.counts_for(&QuestionId::new("q2")).is_none());
    }

    #[test]
    fn test_matches_questions_detects_drift() {
        let qs = questions();
        let mut table = VoteTable::seeded_for(&qs);
        table.remove_question(&QuestionId::new("q2"));
        assert!(!table.matches_questions(&qs));
    }
}
