//! SessionStore: the single owned context for authentication status.
//!
//! The store holds the in-memory [`SessionState`] and the durable token slot
//! it is projected from.  It is created once at startup with
//! [`SessionStore::initialize`] and then shared (behind an `Arc`) with every
//! component that needs to know whether a user is signed in.
//!
//! # Consistency
//!
//! `is_authenticated()` equals "the slot holds a token" immediately after
//! each `login`/`logout` whose storage operation succeeded.  Storage failures
//! are logged and not surfaced.  A change made to the slot by another process
//! is not observed until the next start.
//!
//! # Ordering
//!
//! The state mutation and the slot write happen under one lock, so two
//! back-to-back calls reach the slot in the order they were made.
//!
//! # Change notification
//!
//! Consumers register a callback with
//! [`SessionStore::on_session_state_changed`].  Callbacks run after the store's
//! locks are released and only when the flag actually changes.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{SessionState, SessionToken, AUTH_TOKEN_KEY};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for token slot operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform data directory could not be determined.
    #[error("could not determine platform data directory")]
    NoPlatformDataDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing token slot at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The slot file exists but is not a JSON object of strings.
    #[error("token slot at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The slot content could not be serialised.
    #[error("failed to serialize token slot: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The backing store refused the operation.
    #[error("token slot unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage scoped to the local client.
///
/// Mirrors the browser's persistent storage: string keys, string values,
/// surviving process restarts.
pub trait TokenStore: Send + Sync {
    /// Returns the value under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`.  Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Handle returned by [`SessionStore::on_session_state_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(bool) + Send + Sync>;

/// Process-wide session context.
pub struct SessionStore {
    slot: Arc<dyn TokenStore>,
    state: Mutex<SessionState>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
}

impl SessionStore {
    /// Creates the store from the current content of the token slot.
    ///
    /// Performs a local storage read only.  A read failure is logged and the
    /// session starts signed out.
    pub fn initialize(slot: Arc<dyn TokenStore>) -> Self {
        let token = match slot.read(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("could not read session token, starting signed out: {e}");
                None
            }
        };
        let state = SessionState::from_slot(token.as_deref());
        info!(
            "session initialised (authenticated={})",
            state.is_authenticated
        );
        Self {
            slot,
            state: Mutex::new(state),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Marks the session active and stores `token` in the slot.
    pub fn login(&self, token: &SessionToken) {
        let changed = {
            let mut state = self.lock_state();
            let changed = state.set_authenticated(true);
            if let Err(e) = self.slot.write(AUTH_TOKEN_KEY, token.as_str()) {
                warn!("failed to persist session token: {e}");
            }
            changed
        };
        info!("session established");
        if changed {
            self.notify(true);
        }
    }

    /// Marks the session inactive and removes the token from the slot.
    ///
    /// Calling this while already signed out is a no-op apart from the
    /// (idempotent) slot removal.
    pub fn logout(&self) {
        let changed = {
            let mut state = self.lock_state();
            let changed = state.set_authenticated(false);
            if let Err(e) = self.slot.remove(AUTH_TOKEN_KEY) {
                warn!("failed to remove session token: {e}");
            }
            changed
        };
        info!("session cleared");
        if changed {
            self.notify(false);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_state().is_authenticated
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        *self.lock_state()
    }

    /// Registers `callback` to run with the new flag whenever it changes.
    pub fn on_session_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.lock_observers().push((id, Arc::new(callback)));
        debug!("session observer {id:?} registered");
        id
    }

    /// Removes a callback.  Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }

    fn notify(&self, authenticated: bool) {
        // Clone the callbacks out so none of them runs while a lock is held.
        let observers: Vec<Observer> = self
            .lock_observers()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for observer in observers {
            observer(authenticated);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Observer)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::MemoryTokenStore;

    fn token(value: &str) -> SessionToken {
        SessionToken::new(value).unwrap()
    }

    #[test]
    fn test_initialize_with_empty_slot_is_signed_out() {
        let slot = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::initialize(slot);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_initialize_with_present_slot_is_signed_in() {
        // Arrange
        let slot = Arc::new(MemoryTokenStore::with_token("abc123"));

        // Act
        let store = SessionStore::initialize(slot);

        // Assert
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_initialize_fails_closed_on_read_error() {
        let slot = Arc::new(MemoryTokenStore {
            fail_reads: true,
            ..MemoryTokenStore::with_token("abc123")
        });
        let store = SessionStore::initialize(slot);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_writes_token_and_sets_flag() {
        // Arrange
        let slot = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::initialize(slot.clone());

        // Act
        store.login(&token("abc123"));

        // Assert
        assert!(store.is_authenticated());
        assert_eq!(slot.get(AUTH_TOKEN_KEY).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_login_overwrites_previous_token() {
        let slot = Arc::new(MemoryTokenStore::with_token("old"));
        let store = SessionStore::initialize(slot.clone());

        store.login(&token("new"));

        assert_eq!(slot.get(AUTH_TOKEN_KEY).as_deref(), Some("new"));
    }

    #[test]
    fn test_logout_after_login_clears_slot_and_flag() {
        let slot = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::initialize(slot.clone());
        store.login(&token("abc123"));

        store.logout();

        assert!(!store.is_authenticated());
        assert_eq!(slot.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn test_logout_twice_is_idempotent() {
        // Arrange
        let slot = Arc::new(MemoryTokenStore::with_token("abc123"));
        let store = SessionStore::initialize(slot.clone());

        // Act
        store.logout();
        store.logout();

        // Assert
        assert!(!store.is_authenticated());
        assert_eq!(slot.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn test_login_write_failure_is_not_surfaced() {
        let slot = Arc::new(MemoryTokenStore {
            fail_writes: true,
            ..MemoryTokenStore::new()
        });
        let store = SessionStore::initialize(slot.clone());

        store.login(&token("abc123"));

        // The in-memory flag still follows the call.
        assert!(store.is_authenticated());
        assert_eq!(slot.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn test_logout_remove_failure_is_not_surfaced() {
        // Arrange: a signed-in session whose slot refuses every change
        let slot = Arc::new(MemoryTokenStore {
            fail_writes: true,
            ..MemoryTokenStore::with_token("abc123")
        });
        let store = SessionStore::initialize(slot.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.on_session_state_changed(move |auth| sink.lock().unwrap().push(auth));

        // Act
        store.logout();

        // Assert
        assert!(!store.is_authenticated());
        assert_eq!(*seen.lock().unwrap(), vec![false]);
        assert_eq!(slot.get(AUTH_TOKEN_KEY).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_observer_fires_once_per_change() {
        // Arrange
        let store = SessionStore::initialize(Arc::new(MemoryTokenStore::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.on_session_state_changed(move |auth| sink.lock().unwrap().push(auth));

        // Act
        store.login(&token("a"));
        store.login(&token("b"));
        store.logout();
        store.logout();

        // Assert
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_unsubscribed_observer_is_not_called() {
        let store = SessionStore::initialize(Arc::new(MemoryTokenStore::new()));
        let seen = Arc::new(Mutex::new(0u32));
        let sink = Arc::clone(&seen);
        let id = store.on_session_state_changed(move |_| *sink.lock().unwrap() += 1);

        assert!(store.unsubscribe(id));
        store.login(&token("a"));

        assert_eq!(*seen.lock().unwrap(), 0);
        assert!(!store.unsubscribe(id), "second unsubscribe finds nothing");
    }

    #[test]
    fn test_observer_may_read_store_without_deadlock() {
        let store = Arc::new(SessionStore::initialize(Arc::new(MemoryTokenStore::new())));
        let observed = Arc::new(Mutex::new(None));
        let (store_ref, sink) = (Arc::clone(&store), Arc::clone(&observed));
        store.on_session_state_changed(move |_| {
            *sink.lock().unwrap() = Some(store_ref.is_authenticated());
        });

        store.login(&token("a"));

        assert_eq!(*observed.lock().unwrap(), Some(true));
    }
}
