//! storefront-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does storefront-client do?
//!
//! It is the part of the storefront that runs on the user's machine:
//!
//! 1. Maps every navigation to exactly one view using the fixed route table
//!    from `storefront-core`, keeping a history of visited paths.
//! 2. Keeps an "is a session active" flag in sync with a token stored in a
//!    durable slot that survives restarts.
//! 3. Translates user actions (log in, register, search products, place an
//!    order) into single calls against the remote storefront API.
//!
//! # Architecture
//!
//! ```text
//! main.rs (shell)
//!   ├── application/     Router, SessionStore, domain services, LoginFlow
//!   └── infrastructure/
//!         ├── history/   In-memory navigation history
//!         ├── network/   reqwest-backed ApiClient
//!         └── storage/   Token slot file, TOML configuration
//! ```

/// Application layer: navigation, session state, and API use cases.
pub mod application;

/// Infrastructure layer: history, HTTP, and storage adapters.
pub mod infrastructure;
