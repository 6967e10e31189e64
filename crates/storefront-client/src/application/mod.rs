//! Application layer use cases for the storefront client.
//!
//! Use cases in this layer depend on abstractions (traits) rather than
//! concrete implementations, so the infrastructure can be swapped without
//! changing this code:
//!
//! - [`History`] for the browser-style path history,
//! - [`TokenStore`] for the durable token slot,
//! - [`ApiClient`] for the remote API.
//!
//! # Sub-modules
//!
//! - **`navigate`**      – The router: resolves paths to views, records
//!   history, and advances the navigation generation used to discard stale
//!   responses.
//!
//! - **`session_store`** – The single owned session context: login, logout,
//!   initialisation from the token slot, and change notification.
//!
//! - **`services`**      – Thin auth/product/order services, one API call each.
//!
//! - **`login_flow`**    – Wires the auth service response into the session
//!   store.

pub mod login_flow;
pub mod navigate;
pub mod services;
pub mod session_store;

pub use login_flow::{extract_token, LoginError, LoginFlow, LoginOutcome};
pub use navigate::{History, Navigation, NavigationGeneration, Router};
pub use services::{ApiClient, ApiError, AuthService, OrderService, ProductService};
pub use session_store::{SessionStore, StorageError, SubscriptionId, TokenStore};
