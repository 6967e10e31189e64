//! In-memory token store.
//!
//! Replaces the file-backed slot in tests and in `--ephemeral` shell runs.
//! The `fail_reads` / `fail_writes` flags simulate an unavailable storage
//! backend so callers' failure paths can be exercised.
//!
//! ```ignore
//! let slot = Arc::new(MemoryTokenStore::new());
//! let session = SessionStore::initialize(slot.clone());
//! session.login(&SessionToken::new("abc123")?);
//! assert_eq!(slot.get(AUTH_TOKEN_KEY).as_deref(), Some("abc123"));
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::application::session_store::{StorageError, TokenStore};
use storefront_core::AUTH_TOKEN_KEY;

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    pub slots: Mutex<HashMap<String, String>>,
    /// When `true`, `read` returns [`StorageError::Unavailable`].
    pub fail_reads: bool,
    /// When `true`, `write` and `remove` return [`StorageError::Unavailable`].
    pub fail_writes: bool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose auth token slot already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(AUTH_TOKEN_KEY, token);
        store
    }

    /// Reads `key` directly, bypassing the failure flags.
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Writes `key` directly, bypassing the failure flags.
    pub fn set(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("injected read failure".to_string()));
        }
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("injected write failure".to_string()));
        }
        self.set(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("injected write failure".to_string()));
        }
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
