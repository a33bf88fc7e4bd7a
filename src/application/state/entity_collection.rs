//! Generic keyed entity collection.
//!
//! Entities are held behind `Arc` so readers can keep a snapshot while the
//! store moves on. A mutation that leaves an entity equal to what was stored
//! keeps the old `Arc`, and only effective changes bump the revision that
//! selectors key their memoization on.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A record stored in an [`EntityCollection`].
pub trait Entity: Clone + PartialEq {
    type Key: Clone + Eq + Hash;

    fn key(&self) -> Self::Key;
}

/// Keyed entities in insertion order plus a revision counter.
#[derive(Debug, Clone)]
pub struct EntityCollection<T: Entity> {
    ids: Vec<T::Key>,
    entities: HashMap<T::Key, Arc<T>>,
    revision: u64,
}

impl<T: Entity> Default for EntityCollection<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            entities: HashMap::new(),
            revision: 0,
        }
    }
}

impl<T: Entity> EntityCollection<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection. Later duplicates of a key win.
    pub fn set_all(&mut self, entities: impl IntoIterator<Item = T>) {
        self.ids.clear();
        self.entities.clear();
        for entity in entities {
            self.insert(entity);
        }
        self.bump();
    }

    /// Inserts only if the key is absent. Returns `true` if inserted.
    pub fn add_one(&mut self, entity: T) -> bool {
        if self.entities.contains_key(&entity.key()) {
            return false;
        }
        self.insert(entity);
        self.bump();
        true
    }

    /// Inserts or replaces. Returns `true` if the collection changed.
    pub fn upsert_one(&mut self, entity: T) -> bool {
        let changed = self.put(entity);
        if changed {
            self.bump();
        }
        changed
    }

    /// Upserts every entity, bumping the revision once. Returns how many
    /// entities were inserted or replaced.
    pub fn upsert_many(&mut self, entities: impl IntoIterator<Item = T>) -> usize {
        let changed = entities.into_iter().filter(|e| self.put(e.clone())).count();
        if changed > 0 {
            self.bump();
        }
        changed
    }

    /// Patches an existing entity. Absent keys and patches that change
    /// nothing are no-ops. Returns `true` if the entity changed.
    pub fn update_one(&mut self, key: &T::Key, patch: impl FnOnce(&mut T)) -> bool {
        let changed = self.patch(key, patch);
        if changed {
            self.bump();
        }
        changed
    }

    /// Applies `patch` to each listed key that exists. Returns how many
    /// entities changed.
    pub fn update_many<'a>(
        &mut self,
        keys: impl IntoIterator<Item = &'a T::Key>,
        mut patch: impl FnMut(&mut T),
    ) -> usize
    where
        T::Key: 'a,
    {
        let changed = keys
            .into_iter()
            .filter(|key| self.patch(key, &mut patch))
            .count();
        if changed > 0 {
            self.bump();
        }
        changed
    }

    /// Applies `patch` to every entity matching `predicate`.
    pub fn update_where(
        &mut self,
        predicate: impl Fn(&T) -> bool,
        mut patch: impl FnMut(&mut T),
    ) -> usize {
        let keys: Vec<T::Key> = self.filter_keys(predicate);
        self.update_many(keys.iter(), &mut patch)
    }

    pub fn remove_one(&mut self, key: &T::Key) -> Option<Arc<T>> {
        let removed = self.entities.remove(key)?;
        self.ids.retain(|id| id != key);
        self.bump();
        Some(removed)
    }

    /// Returns how many entities were removed.
    pub fn remove_many<'a>(&mut self, keys: impl IntoIterator<Item = &'a T::Key>) -> usize
    where
        T::Key: 'a,
    {
        let removed = keys
            .into_iter()
            .filter(|key| self.entities.remove(key).is_some())
            .count();
        if removed > 0 {
            self.ids.retain(|id| self.entities.contains_key(id));
            self.bump();
        }
        removed
    }

    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let keys = self.filter_keys(predicate);
        self.remove_many(keys.iter())
    }

    pub fn remove_all(&mut self) {
        if self.ids.is_empty() {
            return;
        }
        self.ids.clear();
        self.entities.clear();
        self.bump();
    }

    #[must_use]
    pub fn get(&self, key: &T::Key) -> Option<Arc<T>> {
        self.entities.get(key).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &T::Key) -> bool {
        self.entities.contains_key(key)
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    #[must_use]
    pub fn all(&self) -> Vec<Arc<T>> {
        self.iter().cloned().collect()
    }

    /// First entity in insertion order matching `predicate`.
    #[must_use]
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.iter().find(|e| predicate(e)).cloned()
    }

    #[must_use]
    pub fn ids(&self) -> &[T::Key] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Counter bumped on every effective mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn insert(&mut self, entity: T) {
        let key = entity.key();
        if self.entities.insert(key.clone(), Arc::new(entity)).is_none() {
            self.ids.push(key);
        }
    }

    fn put(&mut self, entity: T) -> bool {
        if let Some(existing) = self.entities.get(&entity.key())
            && **existing == entity
        {
            return false;
        }
        self.insert(entity);
        true
    }

    fn patch(&mut self, key: &T::Key, patch: impl FnOnce(&mut T)) -> bool {
        let Some(existing) = self.entities.get_mut(key) else {
            return false;
        };
        let mut next = (**existing).clone();
        patch(&mut next);
        if next == **existing {
            return false;
        }
        *existing = Arc::new(next);
        true
    }

    fn filter_keys(&self, predicate: impl Fn(&T) -> bool) -> Vec<T::Key> {
        self.iter()
            .filter(|e| predicate(e))
            .map(|e| e.key())
            .collect()
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

impl<T: Entity> FromIterator<T> for EntityCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.set_all(iter);
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        value: &'static str,
    }

    impl Entity for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32, value: &'static str) -> Item {
        Item { id, value }
    }

    #[test]
    fn test_upsert_many_keeps_latest_per_key() {
        let mut items = EntityCollection::new();
        items.upsert_many([item(1, "a"), item(2, "b")]);
        items.upsert_many([item(2, "c"), item(3, "d"), item(1, "e")]);

        assert_eq!(items.len(), 3);
        assert_eq!(items.get(&1).unwrap().value, "e");
        assert_eq!(items.get(&2).unwrap().value, "c");
        assert_eq!(items.ids(), &[1, 2, 3]);
    }

    #[test]
    fn test_add_one_does_not_overwrite() {
        let mut items = EntityCollection::new();
        assert!(items.add_one(item(1, "a")));
        assert!(!items.add_one(item(1, "b")));
        assert_eq!(items.get(&1).unwrap().value, "a");
    }

    #[test]
    fn test_update_absent_key_is_noop() {
        let mut items: EntityCollection<Item> = [item(1, "a")].into_iter().collect();
        let revision = items.revision();
        assert!(!items.update_one(&9, |i| i.value = "z"));
        assert_eq!(items.revision(), revision);
        assert!(items.get(&9).is_none());
    }

    #[test]
    fn test_unchanged_patch_keeps_identity_and_revision() {
        let mut items: EntityCollection<Item> = [item(1, "a")].into_iter().collect();
        let before = items.get(&1).unwrap();
        let revision = items.revision();

        assert!(!items.update_one(&1, |i| i.value = "a"));
        assert!(!items.upsert_one(item(1, "a")));

        assert!(Arc::ptr_eq(&before, &items.get(&1).unwrap()));
        assert_eq!(items.revision(), revision);
    }

    #[test]
    fn test_effective_patch_bumps_revision() {
        let mut items: EntityCollection<Item> = [item(1, "a")].into_iter().collect();
        let revision = items.revision();
        assert!(items.update_one(&1, |i| i.value = "b"));
        assert_eq!(items.revision(), revision + 1);
    }

    #[test]
    fn test_update_many_counts_changed_entities() {
        let mut items: EntityCollection<Item> =
            [item(1, "a"), item(2, "x"), item(3, "a")].into_iter().collect();
        let changed = items.update_many([1, 2, 4].iter(), |i| i.value = "x");
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_remove_many_and_where() {
        let mut items: EntityCollection<Item> =
            [item(1, "a"), item(2, "b"), item(3, "a")].into_iter().collect();
        assert_eq!(items.remove_where(|i| i.value == "a"), 2);
        assert_eq!(items.ids(), &[2]);
        assert_eq!(items.remove_many([2, 7].iter()), 1);
        assert!(items.is_empty());

        let revision = items.revision();
        items.remove_all();
        assert_eq!(items.revision(), revision);
    }

    #[test]
    fn test_set_all_replaces() {
        let mut items: EntityCollection<Item> = [item(1, "a"), item(2, "b")].into_iter().collect();
        items.set_all([item(3, "c")]);
        assert_eq!(items.ids(), &[3]);
        assert!(items.remove_one(&1).is_none());
        assert_eq!(items.all().len(), 1);
    }
}
