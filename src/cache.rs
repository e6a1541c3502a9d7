//! Session cache gate
//!
//! One hex string under a fixed well-known key, scoped to the browser
//! session. The store is injected so the reporter and tests are not wired
//! to a hidden process-wide `sessionStorage` dependency.

use std::cell::RefCell;

use crate::error::{FingerprintError, Result};

/// Well-known session storage key for the reported hash.
pub const SESSION_HASH_KEY: &str = "fingerprint_hash";

/// Key-value capability the cache gate and remote reporter consume.
pub trait HashStore {
    /// Previously persisted hash, if any. Read failures degrade to `None`.
    fn load(&self) -> Option<String>;

    fn store(&self, hash: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// `sessionStorage`-backed store. Lifetime of the entry is bound to the
/// host session storage; this crate never expires it.
pub struct SessionStorageStore {
    key: String,
}

impl SessionStorageStore {
    pub fn new() -> Self {
        Self {
            key: SESSION_HASH_KEY.to_string(),
        }
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        let window =
            web_sys::window().ok_or_else(|| FingerprintError::Storage("No window".into()))?;
        window
            .session_storage()
            .map_err(|_| FingerprintError::Storage("sessionStorage not available".into()))?
            .ok_or_else(|| FingerprintError::Storage("sessionStorage is null".into()))
    }
}

impl Default for SessionStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HashStore for SessionStorageStore {
    fn load(&self) -> Option<String> {
        let storage = Self::storage().ok()?;
        storage.get_item(&self.key).ok().flatten()
    }

    fn store(&self, hash: &str) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, hash)
            .map_err(|_| FingerprintError::Storage("Failed to persist hash".into()))
    }

    fn clear(&self) -> Result<()> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|_| FingerprintError::Storage("Failed to clear hash".into()))
    }
}

/// In-memory store for headless embedding and tests.
#[derive(Default)]
pub struct MemoryStore {
    entry: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preloaded(hash: impl Into<String>) -> Self {
        Self {
            entry: RefCell::new(Some(hash.into())),
        }
    }
}

impl HashStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.entry.borrow().clone()
    }

    fn store(&self, hash: &str) -> Result<()> {
        *self.entry.borrow_mut() = Some(hash.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.entry.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), None);

        store.store("cafebabe").unwrap();
        assert_eq!(store.load(), Some("cafebabe".to_string()));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn preloaded_store_reads_back() {
        let store = MemoryStore::preloaded("f00d");
        assert_eq!(store.load(), Some("f00d".to_string()));
    }
}
