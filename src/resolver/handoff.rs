use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;

use crate::models::{ProductId, ProductSnapshot};

/// Single-use keyed cache bridging a server-rendered resolution to the
/// immediately following client render of the same product.
///
/// `take` is an atomic get-and-remove, so a slot is consumed 0 or 1 times
/// and never twice. Writing an id that already holds an unconsumed slot
/// overwrites it. Because the key is the product id, a slot can never be
/// served for a different product than it was written for.
#[derive(Default)]
pub struct HandoffStore {
    slots: Mutex<HashMap<ProductId, ProductSnapshot>>,
}

impl HandoffStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot under `id`, replacing any unconsumed slot for it.
    pub fn put(&self, id: ProductId, snapshot: ProductSnapshot) {
        let mut slots = self.slots.lock();
        if slots.insert(id.clone(), snapshot).is_some() {
            debug!(id = %id, "handoff: replaced unconsumed slot");
        } else {
            debug!(id = %id, "handoff: slot stored");
        }
    }

    /// Atomically remove and return the slot for `id`, if one exists.
    /// Slots held under other ids are left untouched.
    pub fn take(&self, id: &ProductId) -> Option<ProductSnapshot> {
        self.slots.lock().remove(id)
    }

    /// Whether an unconsumed slot exists for `id`.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.slots.lock().contains_key(id)
    }
}

static GLOBAL: Lazy<HandoffStore> = Lazy::new(HandoffStore::default);

/// Process-wide store shared by resolvers that are not given a scoped one.
/// Server runtimes that isolate requests should construct a [`HandoffStore`]
/// per request instead.
pub fn global_handoff() -> &'static HandoffStore {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    #[test]
    fn take_consumes_the_slot() {
        let store = HandoffStore::new();
        let id = ProductId::new("7");
        store.put(id.clone(), fixtures::snapshot("7", 1));

        assert!(store.take(&id).is_some());
        assert!(store.take(&id).is_none());
    }

    #[test]
    fn take_for_another_id_leaves_slot_untouched() {
        let store = HandoffStore::new();
        let stored = ProductId::new("7");
        store.put(stored.clone(), fixtures::snapshot("7", 1));

        assert!(store.take(&ProductId::new("8")).is_none());
        assert!(store.contains(&stored));
    }

    #[test]
    fn put_overwrites_unconsumed_slot() {
        let store = HandoffStore::new();
        let id = ProductId::new("7");
        let mut first = fixtures::snapshot("7", 1);
        first.title = "old".to_owned();
        store.put(id.clone(), first);
        store.put(id.clone(), fixtures::snapshot("7", 1));

        let taken = store.take(&id).unwrap();
        assert_ne!(taken.title, "old");
        assert!(store.take(&id).is_none());
    }
}
