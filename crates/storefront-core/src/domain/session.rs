//! Session state and the opaque credential token.
//!
//! The session flag is a cached projection of whether the durable token slot
//! holds a value.  The slot itself lives in the client's storage
//! infrastructure; this module only defines the key, the token type, and the
//! state transitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key of the durable token slot.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Errors produced when constructing a [`SessionToken`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("session token must not be empty")]
    Empty,
}

/// A non-empty opaque credential issued by the remote auth service.
///
/// The format is owned by the auth service; the client never inspects it.
/// `Debug` output is redacted so tokens do not leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps `value` as a token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Empty`] for an empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// In-memory session flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_authenticated: bool,
}

impl SessionState {
    /// Projects the state from the current content of the token slot.
    pub fn from_slot(slot: Option<&str>) -> Self {
        Self {
            is_authenticated: slot.is_some(),
        }
    }

    /// Sets the flag, returning `true` when the value changed.
    pub fn set_authenticated(&mut self, authenticated: bool) -> bool {
        let changed = self.is_authenticated != authenticated;
        self.is_authenticated = authenticated;
        changed
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
