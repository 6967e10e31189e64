//! LoginFlow: carries the auth service's token into the session store.
//!
//! The auth service returns the remote API's response body as opaque JSON.
//! Which field holds the token is a deployment detail, so the flow is
//! configured with a JSON pointer (RFC 6901, e.g. `/token` or
//! `/data/accessToken`) rather than a hard-coded field name.
//!
//! A response that arrives after the user navigated elsewhere is discarded
//! without touching the session.

use std::sync::Arc;

use serde_json::Value;
use storefront_core::protocol::Credentials;
use storefront_core::SessionToken;
use thiserror::Error;
use tracing::{debug, warn};

use super::navigate::NavigationGeneration;
use super::services::{ApiError, AuthService};
use super::session_store::SessionStore;

/// Error type for the login flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response had no non-empty string at the configured pointer.
    #[error("login response has no token at '{pointer}'")]
    MissingToken { pointer: String },
}

/// What happened to a login attempt that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The token was stored and the session is active.
    Authenticated,
    /// The user navigated away before the response arrived; nothing changed.
    Discarded,
}

/// Reads the token at `pointer` from a login response body.
///
/// # Errors
///
/// Returns [`LoginError::MissingToken`] if the pointer does not resolve to a
/// non-empty string.
pub fn extract_token(body: &Value, pointer: &str) -> Result<SessionToken, LoginError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .and_then(|raw| SessionToken::new(raw).ok())
        .ok_or_else(|| LoginError::MissingToken {
            pointer: pointer.to_string(),
        })
}

pub struct LoginFlow {
    auth: AuthService,
    session: Arc<SessionStore>,
    generation: Arc<NavigationGeneration>,
    token_pointer: String,
}

impl LoginFlow {
    pub fn new(
        auth: AuthService,
        session: Arc<SessionStore>,
        generation: Arc<NavigationGeneration>,
        token_pointer: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            session,
            generation,
            token_pointer: token_pointer.into(),
        }
    }

    /// Logs in with `credentials` and, if the response is still wanted,
    /// stores the returned token.
    ///
    /// # Errors
    ///
    /// [`LoginError::Api`] for any error from the auth service (unchanged),
    /// [`LoginError::MissingToken`] if the response carries no token.  The
    /// session is left untouched in both cases.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, LoginError> {
        let issued_at = self.generation.current();
        let body = self.auth.login(credentials).await?;

        if !self.generation.is_current(issued_at) {
            warn!("login response arrived after navigation; discarding");
            return Ok(LoginOutcome::Discarded);
        }

        let token = extract_token(&body, &self.token_pointer)?;
        self.session.login(&token);
        debug!("session established for {}", credentials.email);
        Ok(LoginOutcome::Authenticated)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
