//! Fixed key-space cache of cell values
//!
//! [`SheetCache::setup`] decides which cells exist. [`SheetCache::update`]
//! only ever overwrites those cells, so a raw feed covering the whole sheet
//! cannot grow the cache.

use crate::cell::CellKey;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cache of cell values keyed by [`CellKey`]
///
/// Writers (`setup`, `update`) are serialized behind a write lock; readers
/// share a read lock. Values are handed out as owned copies.
#[derive(Debug, Default)]
pub struct SheetCache {
    values: RwLock<HashMap<CellKey, String>>,
}

impl SheetCache {
    /// Create an unseeded cache; every `get` misses until [`setup`](Self::setup)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the key space with `keys`, each holding an empty value
    ///
    /// Duplicate keys collapse into one entry. Calling this again resets every
    /// value.
    pub fn setup<I>(&self, keys: I)
    where
        I: IntoIterator<Item = CellKey>,
    {
        let seeded: HashMap<CellKey, String> =
            keys.into_iter().map(|key| (key, String::new())).collect();
        log::debug!("Seeding sheet cache with {} cells", seeded.len());
        *self.write() = seeded;
    }

    /// Overwrite values of already registered keys from a raw mapping
    ///
    /// Entries whose key was not seeded are dropped. Returns the number of
    /// entries that were applied.
    pub fn update<I, V>(&self, raw: I) -> usize
    where
        I: IntoIterator<Item = (CellKey, V)>,
        V: Into<String>,
    {
        let mut values = self.write();
        let mut applied = 0;
        let mut dropped = 0;

        for (key, value) in raw {
            match values.get_mut(&key) {
                Some(slot) => {
                    *slot = value.into();
                    applied += 1;
                }
                None => dropped += 1,
            }
        }

        log::debug!("Sheet cache update: {} applied, {} unregistered dropped", applied, dropped);
        applied
    }

    /// Current value of `key`
    ///
    /// `Some("")` means the key is registered but has not received data yet;
    /// `None` means it was never registered.
    pub fn get(&self, key: &CellKey) -> Option<String> {
        self.read().get(key).cloned()
    }

    /// Whether `key` belongs to the seeded key set
    pub fn contains(&self, key: &CellKey) -> bool {
        self.read().contains_key(key)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered keys in row-major order
    pub fn keys(&self) -> Vec<CellKey> {
        let mut keys: Vec<CellKey> = self.read().keys().copied().collect();
        keys.sort();
        keys
    }

    /// Copy of all entries in row-major order
    pub fn snapshot(&self) -> Vec<(CellKey, String)> {
        let mut entries: Vec<(CellKey, String)> = self
            .read()
            .iter()
            .map(|(key, value)| (*key, value.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    // A panic while holding the lock cannot leave the map half-written: setup
    // swaps in a fully built map and update writes whole values.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CellKey, String>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CellKey, String>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn key(reference: &str) -> CellKey {
        CellKey::from_reference(reference).unwrap()
    }

    fn coord(column: i64, row: i64) -> CellKey {
        CellKey::from_coordinate(column, row).unwrap()
    }

    fn seeded() -> SheetCache {
        let cache = SheetCache::new();
        cache.setup(["A1", "B2", "C3", "D4", "AB5", "CZ55"].map(key));
        cache
    }

    #[test]
    fn test_unseeded_cache_misses() {
        let cache = SheetCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&key("A1")), None);
        assert_eq!(cache.update([(key("A1"), "value")]), 0);
        assert_eq!(cache.get(&key("A1")), None);
    }

    #[test]
    fn test_get() {
        let cache = seeded();

        assert_eq!(cache.get(&key("A1")).as_deref(), Some(""));
        assert_eq!(cache.get(&coord(0, 0)).as_deref(), Some(""));
        assert_eq!(cache.get(&key("CZ55")).as_deref(), Some(""));

        assert_eq!(cache.get(&key("A2")), None, "Cache hit for unexpected key");
        assert_eq!(cache.get(&coord(0, 1)), None, "Cache hit for unexpected key");
    }

    #[test]
    fn test_update() {
        let cache = seeded();
        let a1_message = "0,0 (aka. A1) exists in config";
        let c3_message = "C3 exists in config";
        let cz55_message = "CZ55 exists in config";

        let raw: HashMap<CellKey, String> = [
            (coord(0, 0), a1_message),
            (key("C3"), c3_message),
            (key("A2"), "A2 doesn't exist in config"),
            (key("B3"), "B3 doesn't exist in config"),
            (key("CZ55"), cz55_message),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect();

        assert_eq!(cache.update(raw), 3);

        assert_eq!(cache.get(&key("A2")), None, "Cache should have missed");
        assert_eq!(cache.get(&key("B3")), None, "Cache should have missed");
        assert_eq!(cache.len(), 6);

        assert_eq!(cache.get(&key("A1")).as_deref(), Some(a1_message));
        assert_eq!(cache.get(&key("C3")).as_deref(), Some(c3_message));
        assert_eq!(cache.get(&key("CZ55")).as_deref(), Some(cz55_message));
        assert_eq!(cache.get(&key("B2")).as_deref(), Some(""));
        assert_eq!(cache.get(&key("D4")).as_deref(), Some(""));
        assert_eq!(cache.get(&key("AB5")).as_deref(), Some(""));
    }

    #[test]
    fn test_setup_collapses_duplicates_and_resets() {
        let cache = SheetCache::new();
        cache.setup([key("A1"), coord(0, 0), key("a1"), key("B2")]);
        assert_eq!(cache.len(), 2);

        cache.update([(key("A1"), "filled")]);
        cache.setup([key("A1"), key("B2")]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key("A1")).as_deref(), Some(""));
    }

    #[test]
    fn test_setup_replaces_key_space() {
        let cache = seeded();
        cache.setup([key("Z9")]);
        assert_eq!(cache.keys(), vec![key("Z9")]);
        assert_eq!(cache.get(&key("A1")), None);
    }

    #[test]
    fn test_setup_is_idempotent() {
        let once = seeded();
        let twice = seeded();
        twice.setup(["A1", "B2", "C3", "D4", "AB5", "CZ55"].map(key));
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn test_second_update_wins() {
        let cache = seeded();
        cache.update([(key("B2"), "first")]);
        cache.update([(key("B2"), "second")]);
        assert_eq!(cache.get(&key("B2")).as_deref(), Some("second"));
    }

    #[test]
    fn test_update_with_empty_value_keeps_hit() {
        let cache = seeded();
        cache.update([(key("B2"), "filled")]);
        cache.update([(key("B2"), "")]);
        assert_eq!(cache.get(&key("B2")).as_deref(), Some(""));
        assert!(cache.contains(&key("B2")));
    }

    #[test]
    fn test_scenario_from_three_cells() {
        let cache = SheetCache::new();
        cache.setup([key("A1"), key("B2"), key("C3")]);
        cache.update([
            (key("A1"), "hello"),
            (key("A2"), "ignored"),
            (key("C3"), "world"),
        ]);

        assert_eq!(cache.get(&key("A1")).as_deref(), Some("hello"));
        assert_eq!(cache.get(&key("B2")).as_deref(), Some(""));
        assert_eq!(cache.get(&key("C3")).as_deref(), Some("world"));
        assert_eq!(cache.get(&key("A2")), None);
        assert_eq!(
            cache.snapshot(),
            vec![
                (key("A1"), "hello".to_string()),
                (key("B2"), String::new()),
                (key("C3"), "world".to_string()),
            ]
        );
    }

    #[test]
    fn test_concurrent_updates_stay_within_key_space() {
        let cache = Arc::new(seeded());
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for row in 0..100 {
                        cache.update([
                            (coord(0, 0), format!("worker {worker}")),
                            (coord(worker, row + 100), "outside".to_string()),
                        ]);
                        let _ = cache.get(&key("B2"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 6);
        assert!(cache.get(&key("A1")).unwrap().starts_with("worker "));
    }
}
