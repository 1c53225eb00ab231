// ── Generic reactive entity collection ──
//
// Lock-free concurrent storage with O(1) lookups and push-based
// change notification via `watch` channels.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::EntityId;

/// An entity that can live in a collection: cloneable, sendable, and
/// carrying its server-assigned identity.
pub trait Entity: Clone + Send + Sync + 'static {
    fn entity_id(&self) -> EntityId;
}

/// A lock-free, reactive collection for a single entity type.
///
/// Uses `DashMap` keyed by [`EntityId`] and a `watch` channel carrying a
/// full snapshot. Every mutation bumps a version counter and rebuilds
/// the snapshot that subscribers receive.
pub(crate) struct EntityCollection<T: Entity> {
    by_id: DashMap<EntityId, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Entity> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Insert or update an entity. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, entity: T) -> bool {
        let id = entity.entity_id();
        let is_new = !self.by_id.contains_key(&id);
        self.by_id.insert(id, Arc::new(entity));

        self.rebuild_snapshot();
        self.bump_version();

        is_new
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, id: &EntityId) -> Option<Arc<T>> {
        let removed = self.by_id.remove(id).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    /// Replace the whole collection with an incoming server snapshot.
    ///
    /// Upserts all incoming entities, then prunes ids not in the incoming
    /// set. This avoids the brief empty state a clear-then-insert approach
    /// would flash to subscribers.
    pub(crate) fn replace_all(&self, items: Vec<T>) {
        let incoming: HashSet<EntityId> = items.iter().map(Entity::entity_id).collect();
        for entity in items {
            self.by_id.insert(entity.entity_id(), Arc::new(entity));
        }
        self.by_id.retain(|id, _| incoming.contains(id));

        self.rebuild_snapshot();
        self.bump_version();
    }

    /// Look up an entity by id.
    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values into a snapshot vec and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let values: Vec<Arc<T>> = self.by_id.iter().map(|r| Arc::clone(r.value())).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        label: String,
    }

    impl Entity for Item {
        fn entity_id(&self) -> EntityId {
            EntityId::Int(self.id)
        }
    }

    fn item(id: i64, label: &str) -> Item {
        Item {
            id,
            label: label.into(),
        }
    }

    #[test]
    fn upsert_returns_true_for_new_id() {
        let col: EntityCollection<Item> = EntityCollection::new();
        assert!(col.upsert(item(1, "a")));
        assert!(!col.upsert(item(1, "b")));
        assert_eq!(col.get(&EntityId::Int(1)).unwrap().label, "b");
    }

    #[test]
    fn remove_drops_entity() {
        let col: EntityCollection<Item> = EntityCollection::new();
        col.upsert(item(1, "a"));

        let removed = col.remove(&EntityId::Int(1));
        assert_eq!(removed.unwrap().label, "a");
        assert!(col.get(&EntityId::Int(1)).is_none());
        assert!(col.is_empty());
    }

    #[test]
    fn replace_all_prunes_stale_ids() {
        let col: EntityCollection<Item> = EntityCollection::new();
        col.upsert(item(1, "a"));
        col.upsert(item(2, "b"));

        col.replace_all(vec![item(2, "b2"), item(3, "c")]);

        assert_eq!(col.len(), 2);
        assert!(col.get(&EntityId::Int(1)).is_none());
        assert_eq!(col.get(&EntityId::Int(2)).unwrap().label, "b2");
        assert!(col.get(&EntityId::Int(3)).is_some());
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let col: EntityCollection<Item> = EntityCollection::new();
        assert!(col.snapshot().is_empty());

        col.upsert(item(1, "a"));
        col.upsert(item(2, "b"));

        assert_eq!(col.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn subscribers_see_mutations() {
        let col: EntityCollection<Item> = EntityCollection::new();
        let mut rx = col.subscribe();

        col.upsert(item(1, "a"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
