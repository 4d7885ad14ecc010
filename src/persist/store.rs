//! Key-value store abstraction.

use rustc_hash::FxHashMap;

use crate::diagnostic::StoreError;

/// A persistent string key-value store with a capacity limit.
///
/// Hosts back this with whatever durable storage they have. Writes may be
/// rejected with [`StoreError::QuotaExceeded`]; a rejected write leaves the
/// previous value in place.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str);
}

/// In-memory store with an optional byte quota.
///
/// Usage is counted as the byte length of every key plus its value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding at most `bytes` bytes.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            quota: Some(bytes),
        }
    }

    /// Bytes currently used.
    pub fn used(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let available = quota.saturating_sub(self.used() - replaced);
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded() {
        let mut store = MemoryStore::new();
        store.set("k", &"x".repeat(10_000)).unwrap();
        assert_eq!(store.get("k").map(|v| v.len()), Some(10_000));
        store.remove("k");
        store.remove("k");
        assert!(store.is_empty());
    }

    #[test]
    fn test_quota() {
        let mut store = MemoryStore::with_quota(10);
        store.set("a", "1234").unwrap();
        assert_eq!(store.used(), 5);

        let err = store.set("b", "123456").unwrap_err();
        assert_eq!(
            err,
            StoreError::QuotaExceeded {
                key: "b".into(),
                needed: 7,
                available: 5,
            }
        );
        assert_eq!(store.get("b"), None);
        assert_eq!(store.get("a").as_deref(), Some("1234"));
    }

    #[test]
    fn test_overwrite_reuses_space() {
        let mut store = MemoryStore::with_quota(10);
        store.set("a", "123456789").unwrap();
        store.set("a", "987654321").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("987654321"));
    }
}
