// ── Generic resource store ──
//
// One store per entity type: a reactive collection plus the loading and
// error state the view renders alongside it. Mutations are applied only
// after server confirmation; a failed operation leaves the cached
// collection exactly as it was.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use super::collection::{Entity, EntityCollection};
use crate::model::EntityId;

/// Cache + CRUD state for one entity type.
///
/// `fetch` results are tagged with a monotonic sequence number; only the
/// latest issued fetch may replace the collection. Responses from
/// superseded fetches are discarded, so out-of-order completions cannot
/// clobber newer data.
pub struct ResourceStore<T: Entity> {
    collection: EntityCollection<T>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    fetch_seq: AtomicU64,
}

impl<T: Entity> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> ResourceStore<T> {
    pub fn new() -> Self {
        let (loading, _) = watch::channel(false);
        let (error, _) = watch::channel(None);
        Self {
            collection: EntityCollection::new(),
            loading,
            error,
            fetch_seq: AtomicU64::new(0),
        }
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────

    /// Start a fetch: flips `loading` on and issues a sequence number
    /// that must accompany the result.
    pub(crate) fn begin_fetch(&self) -> u64 {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.loading.send(true);
        seq
    }

    /// Apply a successful fetch: replaces the collection and clears the
    /// error. Returns `false` if a newer fetch superseded this one, in
    /// which case nothing is touched.
    pub(crate) fn apply_fetch(&self, seq: u64, items: Vec<T>) -> bool {
        if seq != self.fetch_seq.load(Ordering::SeqCst) {
            debug!(seq, "discarding superseded fetch result");
            return false;
        }
        self.collection.replace_all(items);
        let _ = self.error.send(None);
        let _ = self.loading.send(false);
        true
    }

    /// Record a failed fetch. The collection keeps its last-known-good
    /// contents; `loading` is cleared and the message lands in `error`.
    pub(crate) fn fail_fetch(&self, seq: u64, message: String) {
        if seq != self.fetch_seq.load(Ordering::SeqCst) {
            debug!(seq, "ignoring failure of superseded fetch");
            return;
        }
        let _ = self.error.send(Some(message));
        let _ = self.loading.send(false);
    }

    // ── Confirmed mutations ──────────────────────────────────────────

    /// Apply a server-confirmed create or update.
    pub(crate) fn apply_confirmed(&self, entity: T) {
        self.collection.upsert(entity);
        let _ = self.error.send(None);
    }

    /// Apply a server-acknowledged delete.
    pub(crate) fn apply_removed(&self, id: &EntityId) -> Option<Arc<T>> {
        let removed = self.collection.remove(id);
        let _ = self.error.send(None);
        removed
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.collection.get(id)
    }

    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.collection.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.collection.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: String,
    }

    impl Entity for Item {
        fn entity_id(&self) -> EntityId {
            EntityId::Int(self.id)
        }
    }

    fn item(id: i64, name: &str) -> Item {
        Item {
            id,
            name: name.into(),
        }
    }

    #[test]
    fn fetch_replaces_items_and_clears_error() {
        let store: ResourceStore<Item> = ResourceStore::new();
        let seq = store.begin_fetch();
        assert!(store.is_loading());

        assert!(store.apply_fetch(seq, vec![item(1, "Farm A")]));
        assert!(!store.is_loading());
        assert!(store.error().is_none());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn failed_fetch_keeps_last_known_good_items() {
        let store: ResourceStore<Item> = ResourceStore::new();
        let seq = store.begin_fetch();
        store.apply_fetch(seq, vec![item(1, "a"), item(2, "b")]);

        let seq = store.begin_fetch();
        store.fail_fetch(seq, "network unreachable".into());

        assert!(!store.is_loading());
        assert_eq!(store.error().as_deref(), Some("network unreachable"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn superseded_fetch_is_discarded() {
        let store: ResourceStore<Item> = ResourceStore::new();
        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // Newer fetch lands first.
        assert!(store.apply_fetch(second, vec![item(2, "new")]));
        // The older response arrives late and must not win.
        assert!(!store.apply_fetch(first, vec![item(1, "old")]));

        let snap = store.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].name, "new");
    }

    #[test]
    fn stale_failure_does_not_overwrite_fresh_success() {
        let store: ResourceStore<Item> = ResourceStore::new();
        let first = store.begin_fetch();
        let second = store.begin_fetch();

        store.apply_fetch(second, vec![item(1, "fresh")]);
        store.fail_fetch(first, "timed out".into());

        assert!(store.error().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn confirmed_create_appears_exactly_once() {
        let store: ResourceStore<Item> = ResourceStore::new();
        let seq = store.begin_fetch();
        store.apply_fetch(seq, vec![item(1, "existing")]);

        store.apply_confirmed(item(2, "New Farm"));

        let snap = store.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(
            snap.iter().filter(|i| i.id == 2).count(),
            1,
            "created entity must appear exactly once"
        );
    }

    #[test]
    fn confirmed_update_replaces_only_matching_entity() {
        let store: ResourceStore<Item> = ResourceStore::new();
        let seq = store.begin_fetch();
        store.apply_fetch(seq, vec![item(1, "Old"), item(2, "Other")]);

        store.apply_confirmed(item(1, "Renamed"));

        assert_eq!(store.get(&EntityId::Int(1)).unwrap().name, "Renamed");
        assert_eq!(store.get(&EntityId::Int(2)).unwrap().name, "Other");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn acknowledged_delete_removes_entity() {
        let store: ResourceStore<Item> = ResourceStore::new();
        let seq = store.begin_fetch();
        store.apply_fetch(seq, vec![item(1, "a"), item(2, "b")]);

        store.apply_removed(&EntityId::Int(1));

        assert!(store.get(&EntityId::Int(1)).is_none());
        assert_eq!(store.len(), 1);
    }
}
