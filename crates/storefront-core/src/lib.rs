//! # storefront-core
//!
//! Shared library for the storefront client containing the navigation model,
//! the session token type, and the contract with the remote storefront API.
//!
//! This crate is used by the client application and its tests.
//! It has zero dependencies on network sockets, storage, or async runtimes.
//!
//! # Architecture overview
//!
//! The storefront client renders product search, authentication, cart, and
//! profile views.  Two pieces of it carry real rules, and they live here:
//!
//! - **`domain`** – The route table (which URL path mounts which view) and
//!   the session state (whether a user is authenticated).  Pure data and pure
//!   functions only.
//!
//! - **`protocol`** – The remote API surface: endpoint paths and the request
//!   bodies the client builds.  Response bodies are owned by the remote
//!   service and stay opaque JSON in the client crate.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `storefront_core::RouteTable` instead of `storefront_core::domain::route::RouteTable`.
pub use domain::route::{RouteEntry, RouteError, RouteTable, ViewId};
pub use domain::session::{SessionState, SessionToken, TokenError, AUTH_TOKEN_KEY};
pub use protocol::endpoints::ApiEndpoint;
