//! Persistent key-value store adapter.
//!
//! The storefront keeps two durable entries on the visitor's side, each under
//! its own key and saved independently of the other:
//!
//! | key     | value                                            |
//! |---------|--------------------------------------------------|
//! | `cart`  | JSON array of `{id, name, price, image, quantity}` |
//! | `theme` | `"light"` or `"dark"`                            |
//!
//! There is no atomicity across keys. Implementations report storage faults
//! as [`StoreError`]; callers log them and keep going with in-memory state.

use std::collections::HashMap;

use thiserror::Error;

/// Well-known store keys.
pub mod keys {
    /// Key holding the serialized cart.
    pub const CART: &str = "cart";

    /// Key holding the explicit theme choice.
    pub const THEME: &str = "theme";
}

/// Errors raised when writing to a store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage cannot be written at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value does not fit in the storage quota.
    #[error("storage quota exceeded for '{key}': {size} bytes (limit {limit})")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Size of the encoded entry.
        size: usize,
        /// Maximum entry size.
        limit: usize,
    },
}

/// Durable get/set of serialized values under known keys.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the storage is unavailable or full.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

/// In-memory store, used by tests and as a stand-in host store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects values longer than `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Pre-populate an entry without counting it as a write.
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Raw access to a stored value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_owned(),
                    size: value.len(),
                    limit,
                });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_load_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.load(keys::CART), None);
    }

    #[test]
    fn test_memory_store_save_then_load() {
        let mut store = MemoryStore::new();
        store.save(keys::THEME, "dark").unwrap();
        assert_eq!(store.load(keys::THEME).as_deref(), Some("dark"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = MemoryStore::new();
        store.save(keys::THEME, "light").unwrap();
        store.save(keys::CART, "[]").unwrap();
        assert_eq!(store.get(keys::THEME), Some("light"));
        assert_eq!(store.get(keys::CART), Some("[]"));
    }

    #[test]
    fn test_quota_rejects_large_values() {
        let mut store = MemoryStore::with_quota(4);
        let err = store.save(keys::CART, "[1,2,3]").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { size: 7, limit: 4, .. }));
        assert_eq!(store.load(keys::CART), None);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_mut_ref_delegates() {
        let mut store = MemoryStore::new();
        {
            let mut borrowed = &mut store;
            borrowed.save(keys::THEME, "dark").unwrap();
            assert_eq!(borrowed.load(keys::THEME).as_deref(), Some("dark"));
        }
        assert_eq!(store.writes(), 1);
    }
}
