//! The live state synchronizer.
//!
//! One [`LiveState`] instance per context. It loads the initial state from
//! the store, hands collaborators a read/mutate API, persists every local
//! mutation, and replays changes persisted by other contexts into the
//! local view.
//!
//! # Consistency policy: last-writer-wins, no merge
//!
//! `mutate` applies the updater to this context's current in-memory
//! snapshot, never to a re-read of the store. If two contexts mutate from
//! stale snapshots concurrently, the write that reaches the store last
//! fully overwrites the other; the earlier writer's delta survives only in
//! its own memory until the later write's notification arrives and
//! replaces it. This is an accepted weak-consistency trade-off of the
//! server-less design, not a bug. Do not add locks, queues, or merges
//! here.

use crate::codec;
use crate::ports::{ChangeFeed, ChangePublisher, StateChange, StateStore};
use livepoll_domain::{AppState, DomainError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback invoked after every applied state change, local or remote.
pub type ChangeListener = Box<dyn FnMut(&AppState) + Send>;

/// Per-context runtime object owning the in-memory view of the shared
/// state for one storage key.
pub struct LiveState {
    key: String,
    store: Arc<dyn StateStore>,
    publisher: Box<dyn ChangePublisher>,
    feed: Box<dyn ChangeFeed>,
    state: AppState,
    listeners: Vec<ChangeListener>,
}

impl LiveState {
    /// Create a synchronizer for `key`, loading the stored state.
    ///
    /// When the key is absent or its value does not decode, the store is
    /// seeded with `default_state` (best-effort) and the context starts
    /// from the default. A failing read also starts from the default but
    /// leaves the store alone.
    pub fn initialize(
        key: impl Into<String>,
        default_state: AppState,
        store: Arc<dyn StateStore>,
        publisher: Box<dyn ChangePublisher>,
        feed: Box<dyn ChangeFeed>,
    ) -> Self {
        let key = key.into();
        let state = match store.get(&key) {
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(state) => state,
                Err(e) => {
                    warn!("stored state under '{key}' is unusable, reseeding: {e}");
                    Self::seed(&key, &default_state, store.as_ref());
                    default_state
                }
            },
            Ok(None) => {
                debug!("no state under '{key}', seeding default");
                Self::seed(&key, &default_state, store.as_ref());
                default_state
            }
            Err(e) => {
                warn!("could not read '{key}', serving default in memory only: {e}");
                default_state
            }
        };

        Self {
            key,
            store,
            publisher,
            feed,
            state,
            listeners: Vec::new(),
        }
    }

    /// Best-effort first write of the default state plus the question-list
    /// bootstrap cache.
    fn seed(key: &str, state: &AppState, store: &dyn StateStore) {
        match codec::encode(state) {
            Ok(raw) => {
                if let Err(e) = store.set(key, &raw) {
                    warn!("could not seed '{key}': {e}");
                }
            }
            Err(e) => warn!("could not encode default state for '{key}': {e}"),
        }
        match codec::encode_questions(state) {
            Ok(raw) => {
                let cache_key = questions_cache_key(key);
                if let Err(e) = store.set(&cache_key, &raw) {
                    warn!("could not seed question cache '{cache_key}': {e}");
                }
            }
            Err(e) => warn!("could not encode question cache for '{key}': {e}"),
        }
    }

    /// The storage key this synchronizer is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current in-memory view: the last applied local or remote state.
    pub fn read(&self) -> &AppState {
        &self.state
    }

    /// Apply a pure transformation to the current in-memory state.
    ///
    /// The new value replaces the in-memory state, listeners are notified,
    /// and the state is persisted and broadcast. Persistence failures are
    /// logged and swallowed: this context keeps serving its memory, the
    /// change just won't reach other contexts or survive a reload.
    pub fn mutate(&mut self, updater: impl FnOnce(&AppState) -> AppState) {
        let next = updater(&self.state);
        self.apply_local(next);
    }

    /// Fallible variant of [`mutate`](Self::mutate) for validated domain
    /// transitions. On error nothing changes and nothing is persisted.
    pub fn try_mutate(
        &mut self,
        updater: impl FnOnce(&AppState) -> Result<AppState, DomainError>,
    ) -> Result<(), DomainError> {
        let next = updater(&self.state)?;
        self.apply_local(next);
        Ok(())
    }

    fn apply_local(&mut self, next: AppState) {
        self.state = next;
        self.notify_listeners();
        match codec::encode(&self.state) {
            Ok(raw) => match self.store.set(&self.key, &raw) {
                Ok(()) => {
                    // Broadcast only after a successful write: other
                    // contexts must never observe a value the store
                    // doesn't hold.
                    self.publisher.publish(StateChange {
                        key: self.key.clone(),
                        new_value: raw,
                    });
                }
                Err(e) => {
                    warn!("state for '{}' not persisted, serving memory only: {e}", self.key);
                }
            },
            Err(e) => warn!("state for '{}' did not encode: {e}", self.key),
        }
    }

    /// Drain pending remote notifications and apply them.
    ///
    /// Each decodable payload for this key unconditionally replaces the
    /// in-memory state (no merge, no conflict detection) and notifies
    /// listeners. Undecodable payloads are logged and skipped, keeping the
    /// last known-good state.
    pub fn pump(&mut self) {
        for change in self.feed.poll() {
            if change.key != self.key {
                continue;
            }
            match codec::decode(&change.new_value) {
                Ok(state) => self.apply_remote(state),
                Err(e) => warn!("ignoring undecodable remote state for '{}': {e}", self.key),
            }
        }
    }

    /// Replace the local view with a state another context persisted.
    fn apply_remote(&mut self, state: AppState) {
        debug!("applying remote state for '{}'", self.key);
        self.state = state;
        self.notify_listeners();
    }

    /// Register a callback fired after every applied change, local or
    /// remote. Collaborators use this to re-render.
    pub fn on_change(&mut self, listener: impl FnMut(&AppState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify_listeners(&mut self) {
        let state = &self.state;
        for listener in self.listeners.iter_mut() {
            listener(state);
        }
    }
}

/// Companion key caching just the question list for bootstrap.
pub fn questions_cache_key(state_key: &str) -> String {
    format!("{state_key}.questions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StoreError;
    use livepoll_domain::{Direction, OptionId, QuestionId, advance_question, cast_vote};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;

    /// Minimal shared map store for exercising the synchronizer without
    /// the infrastructure crate.
    #[derive(Clone, Default)]
    struct MapStore {
        entries: Arc<Mutex<HashMap<String, String>>>,
        fail_writes: Arc<AtomicBool>,
    }

    impl StateStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            Ok(entries.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::Relaxed) {
                return Err(StoreError::WriteRejected("quota exceeded".to_string()));
            }
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct MpscPublisher(mpsc::Sender<StateChange>);

    impl ChangePublisher for MpscPublisher {
        fn publish(&self, change: StateChange) {
            let _ = self.0.send(change);
        }
    }

    struct MpscFeed(mpsc::Receiver<StateChange>);

    impl ChangeFeed for MpscFeed {
        fn poll(&mut self) -> Vec<StateChange> {
            self.0.try_iter().collect()
        }
    }

    /// Publisher plus the receiver observing what it broadcasts.
    fn observed_publisher() -> (MpscPublisher, mpsc::Receiver<StateChange>) {
        let (tx, rx) = mpsc::channel();
        (MpscPublisher(tx), rx)
    }

    /// Feed plus the sender tests use to inject "remote" notifications.
    fn manual_feed() -> (mpsc::Sender<StateChange>, MpscFeed) {
        let (tx, rx) = mpsc::channel();
        (tx, MpscFeed(rx))
    }

    fn silent_pair() -> (MpscPublisher, MpscFeed) {
        let (publisher, _) = observed_publisher();
        let (_, feed) = manual_feed();
        (publisher, feed)
    }

    fn live(store: MapStore, publisher: MpscPublisher, feed: MpscFeed) -> LiveState {
        LiveState::initialize(
            "live-poll-app",
            AppState::initial(),
            Arc::new(store),
            Box::new(publisher),
            Box::new(feed),
        )
    }

    #[test]
    fn test_initialize_seeds_empty_store() {
        let store = MapStore::default();
        let (publisher, feed) = silent_pair();
        let live = live(store.clone(), publisher, feed);

        assert_eq!(live.read(), &AppState::initial());
        let raw = store.get("live-poll-app").unwrap().expect("seeded");
        assert_eq!(codec::decode(&raw).unwrap(), AppState::initial());
        // Bootstrap cache seeded alongside.
        assert!(store.get("live-poll-app.questions").unwrap().is_some());
    }

    #[test]
    fn test_initialize_loads_existing_state() {
        let store = MapStore::default();
        let mut stored = AppState::initial();
        stored = advance_question(&stored, Direction::Forward);
        store
            .set("live-poll-app", &codec::encode(&stored).unwrap())
            .unwrap();

        let (publisher, feed) = silent_pair();
        let live = live(store, publisher, feed);
        assert_eq!(live.read().current_question_index, 1);
    }

    #[test]
    fn test_initialize_reseeds_on_garbage() {
        let store = MapStore::default();
        store.set("live-poll-app", "{broken").unwrap();

        let (publisher, feed) = silent_pair();
        let live = live(store.clone(), publisher, feed);
        assert_eq!(live.read(), &AppState::initial());
        let raw = store.get("live-poll-app").unwrap().expect("reseeded");
        assert!(codec::decode(&raw).is_ok());
    }

    #[test]
    fn test_mutate_persists_and_broadcasts() {
        let store = MapStore::default();
        let (publisher, broadcast_rx) = observed_publisher();
        let (_, feed) = manual_feed();
        let mut live = live(store.clone(), publisher, feed);

        live.mutate(|s| advance_question(s, Direction::Forward));

        let raw = store.get("live-poll-app").unwrap().expect("persisted");
        assert_eq!(codec::decode(&raw).unwrap().current_question_index, 1);

        let change = broadcast_rx.try_recv().expect("broadcast after persist");
        assert_eq!(change.key, "live-poll-app");
        assert_eq!(change.new_value, raw);
    }

    #[test]
    fn test_mutate_survives_write_failure() {
        let store = MapStore::default();
        let (publisher, broadcast_rx) = observed_publisher();
        let (_, feed) = manual_feed();
        let mut live = live(store.clone(), publisher, feed);

        store.fail_writes.store(true, Ordering::Relaxed);
        live.mutate(|s| advance_question(s, Direction::Forward));

        // In-memory state advanced, the store kept the seeded value, and
        // nothing was broadcast.
        assert_eq!(live.read().current_question_index, 1);
        let raw = store.get("live-poll-app").unwrap().expect("seed value still present");
        assert_eq!(codec::decode(&raw).unwrap().current_question_index, 0);
        assert!(broadcast_rx.try_recv().is_err());
    }

    #[test]
    fn test_try_mutate_rejection_changes_nothing() {
        let store = MapStore::default();
        let (publisher, feed) = silent_pair();
        let mut live = live(store.clone(), publisher, feed);

        let before = live.read().clone();
        let result = live.try_mutate(|s| {
            cast_vote(s, &QuestionId::new("q2"), &OptionId::new("q2o1"))
        });
        assert!(result.is_err());
        assert_eq!(live.read(), &before);
    }

    #[test]
    fn test_pump_applies_remote_change() {
        let store = MapStore::default();
        let (publisher, _) = observed_publisher();
        let (tx, feed) = manual_feed();
        let mut live = live(store, publisher, feed);

        let mut remote = AppState::initial();
        remote = cast_vote(&remote, &QuestionId::new("q1"), &OptionId::new("q1o2")).unwrap();
        tx.send(StateChange {
            key: "live-poll-app".to_string(),
            new_value: codec::encode(&remote).unwrap(),
        })
        .unwrap();

        live.pump();
        assert_eq!(
            live.read()
                .votes
                .count(&QuestionId::new("q1"), &OptionId::new("q1o2")),
            1
        );
    }

    #[test]
    fn test_pump_ignores_other_keys_and_garbage() {
        let store = MapStore::default();
        let (publisher, _) = observed_publisher();
        let (tx, feed) = manual_feed();
        let mut live = live(store, publisher, feed);

        tx.send(StateChange {
            key: "some-other-key".to_string(),
            new_value: "[]".to_string(),
        })
        .unwrap();
        tx.send(StateChange {
            key: "live-poll-app".to_string(),
            new_value: "{definitely not state".to_string(),
        })
        .unwrap();

        live.pump();
        assert_eq!(live.read(), &AppState::initial());
    }

    #[test]
    fn test_pump_applies_changes_in_order() {
        let store = MapStore::default();
        let (publisher, _) = observed_publisher();
        let (tx, feed) = manual_feed();
        let mut live = live(store, publisher, feed);

        let one = advance_question(&AppState::initial(), Direction::Forward);
        let two = advance_question(&one, Direction::Forward);
        for state in [&one, &two] {
            tx.send(StateChange {
                key: "live-poll-app".to_string(),
                new_value: codec::encode(state).unwrap(),
            })
            .unwrap();
        }

        live.pump();
        // Last write wins; both were applied in order.
        assert_eq!(live.read().current_question_index, 2);
    }

    #[test]
    fn test_listeners_fire_on_local_and_remote_changes() {
        let store = MapStore::default();
        let (publisher, _) = observed_publisher();
        let (tx, feed) = manual_feed();
        let mut live = live(store, publisher, feed);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        live.on_change(move |state| {
            sink.lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(state.current_question_index);
        });

        live.mutate(|s| advance_question(s, Direction::Forward));

        let remote = advance_question(live.read(), Direction::Forward);
        tx.send(StateChange {
            key: "live-poll-app".to_string(),
            new_value: codec::encode(&remote).unwrap(),
        })
        .unwrap();
        live.pump();

        assert_eq!(*seen.lock().unwrap_or_else(|e| e.into_inner()), vec![1, 2]);
    }
}
