//! Session-scoped store: private to one context, gone when it ends.
//!
//! Unlike [`MemoryStore`](super::MemoryStore), a `SessionStore` is not
//! clonable into a shared handle; each context constructs its own and its
//! contents die with it. This is where the participant's VotedSet lives.

use livepoll_application::ports::{StateStore, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Per-context key/value store with session lifetime.
#[derive(Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
