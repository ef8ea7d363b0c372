//! The participant context's private "already voted" record.
//!
//! A [`VotedSet`] belongs to exactly one context and is never shared. It
//! gates the local UI against double voting; it is not a correctness
//! mechanism for the shared tallies. Backed by a session-scoped store
//! instance, it lives only as long as the session does.

use crate::ports::StateStore;
use livepoll_domain::QuestionId;
use std::sync::Arc;
use tracing::warn;

/// Question ids the local participant has already voted on, in the order
/// the votes were cast.
pub struct VotedSet {
    key: String,
    store: Arc<dyn StateStore>,
    voted: Vec<QuestionId>,
}

impl VotedSet {
    /// Load the set from the session store, starting empty when the key is
    /// absent or holds something unreadable.
    pub fn load(key: impl Into<String>, store: Arc<dyn StateStore>) -> Self {
        let key = key.into();
        let voted = match store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("voted set under '{key}' is unreadable, starting empty: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read voted set '{key}', starting empty: {e}");
                Vec::new()
            }
        };
        Self { key, store, voted }
    }

    /// Whether this participant already voted on `question_id`.
    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.voted.contains(question_id)
    }

    /// Record a successful vote. Call only after the mutate succeeded, so
    /// a rejected vote never locks the participant out.
    pub fn record(&mut self, question_id: QuestionId) {
        if self.voted.contains(&question_id) {
            return;
        }
        self.voted.push(question_id);
        self.persist();
    }

    /// Number of questions voted on so far.
    pub fn len(&self) -> usize {
        self.voted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voted.is_empty()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.voted) {
            Ok(raw) => {
                if let Err(e) = self.store.set(&self.key, &raw) {
                    warn!("voted set '{}' not persisted: {e}", self.key);
                }
            }
            Err(e) => warn!("voted set '{}' did not encode: {e}", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StoreError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct MapStore(Arc<Mutex<HashMap<String, String>>>);

    impl StateStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self
                .0
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .get(key)
                .cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_starts_empty_and_grows() {
        let store = MapStore::default();
        let mut voted = VotedSet::load("voted-questions", Arc::new(store));
        assert!(voted.is_empty());

        voted.record(QuestionId::new("q1"));
        assert!(voted.contains(&QuestionId::new("q1")));
        assert!(!voted.contains(&QuestionId::new("q2")));
        assert_eq!(voted.len(), 1);
    }

    #[test]
    fn test_record_is_idempotent() {
        let store = MapStore::default();
        let mut voted = VotedSet::load("voted-questions", Arc::new(store));
        voted.record(QuestionId::new("q1"));
        voted.record(QuestionId::new("q1"));
        assert_eq!(voted.len(), 1);
    }

    #[test]
    fn test_persists_as_ordered_id_list() {
        let store = MapStore::default();
        let mut voted = VotedSet::load("voted-questions", Arc::new(store.clone()));
        voted.record(QuestionId::new("q2"));
        voted.record(QuestionId::new("q1"));

        let raw = store.get("voted-questions").unwrap().expect("persisted");
        assert_eq!(raw, r#"["q2","q1"]"#);

        // A reload within the same session sees the same set.
        let reloaded = VotedSet::load("voted-questions", Arc::new(store));
        assert!(reloaded.contains(&QuestionId::new("q1")));
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_garbage_payload_starts_empty() {
        let store = MapStore::default();
        store.set("voted-questions", "{oops").unwrap();
        let voted = VotedSet::load("voted-questions", Arc::new(store));
        assert!(voted.is_empty());
    }
}
