//! Integration tests for the router over the in-memory history.
//!
//! # Purpose
//!
//! These tests walk the `Router` through the navigations a user makes in the
//! storefront, using only the public API.  They verify:
//!
//! - Each storefront path mounts its view, and unknown paths mount the
//!   not-found view instead of failing.
//! - Navigating to the current path again adds no history entry.
//! - `back` returns to the previous view and stops at the first entry.
//! - A login response that arrives after the user navigated away is dropped
//!   and leaves the session untouched.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use storefront_client::application::{
    ApiClient, ApiError, AuthService, History, LoginFlow, LoginOutcome, NavigationGeneration,
    Router, SessionStore,
};
use storefront_client::infrastructure::history::MemoryHistory;
use storefront_client::infrastructure::storage::MemoryTokenStore;
use storefront_core::protocol::Credentials;
use storefront_core::{RouteTable, ViewId};

fn router() -> Router {
    Router::new(RouteTable::storefront(), Box::new(MemoryHistory::new("/")))
}

// ── Path → view ───────────────────────────────────────────────────────────────

#[test]
fn test_every_storefront_path_mounts_its_view() {
    let mut router = router();
    let cases = [
        ("/login", ViewId::Login),
        ("/register", ViewId::Register),
        ("/cart", ViewId::Cart),
        ("/profile", ViewId::Profile),
        ("/auth/callback", ViewId::AuthCallback),
        ("/", ViewId::Home),
    ];

    for (path, expected) in cases {
        let nav = router.navigate(path);
        assert_eq!(nav.view, expected, "path {path}");
        assert_eq!(router.current_view(), expected);
    }
}

#[test]
fn test_unknown_path_mounts_not_found_and_is_recorded() {
    // Arrange
    let mut router = router();

    // Act
    let nav = router.navigate("/unknown");

    // Assert
    assert_eq!(nav.view, ViewId::NotFound);
    assert!(nav.pushed);
    assert_eq!(router.current_path(), "/unknown");
    assert!(router.resolve("/unknown").is_err());
}

// ── History ───────────────────────────────────────────────────────────────────

#[test]
fn test_repeated_navigation_is_idempotent() {
    let mut router = router();
    router.navigate("/cart");
    let generation = router.generation().current();

    let again = router.navigate("/cart");

    assert!(!again.pushed);
    assert_eq!(again.view, ViewId::Cart);
    assert_eq!(router.history().len(), 2);
    assert_eq!(router.generation().current(), generation);
}

#[test]
fn test_back_walks_history_and_stops_at_start() {
    // Arrange: / → /cart → /profile
    let mut router = router();
    router.navigate("/cart");
    router.navigate("/profile");

    // Act / Assert
    assert_eq!(router.back().map(|n| n.view), Some(ViewId::Cart));
    assert_eq!(router.back().map(|n| n.view), Some(ViewId::Home));
    assert_eq!(router.back(), None);
    assert_eq!(router.current_path(), "/");
}

// ── Stale responses ───────────────────────────────────────────────────────────

/// Advances the shared generation while the login request is in flight,
/// the way a navigation during the request would.
struct NavigatingApi {
    generation: Arc<NavigationGeneration>,
}

#[async_trait]
impl ApiClient for NavigatingApi {
    async fn get(&self, _path: &str, _query: &[(String, String)]) -> Result<Value, ApiError> {
        Err(ApiError::Transport("GET not expected".to_string()))
    }

    async fn post(&self, _path: &str, _body: &Value) -> Result<Value, ApiError> {
        self.generation.advance();
        Ok(json!({ "token": "late" }))
    }
}

#[tokio::test]
async fn test_login_response_after_navigation_is_discarded() {
    // Arrange
    let mut router = router();
    router.navigate("/login");
    let slot = Arc::new(MemoryTokenStore::new());
    let session = Arc::new(SessionStore::initialize(slot.clone()));
    let api = NavigatingApi {
        generation: router.generation(),
    };
    let flow = LoginFlow::new(
        AuthService::new(Arc::new(api)),
        Arc::clone(&session),
        router.generation(),
        "/token",
    );

    // Act
    let outcome = flow
        .login(&Credentials {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome, LoginOutcome::Discarded);
    assert!(!session.is_authenticated());
    assert_eq!(slot.get("authToken"), None);
}
