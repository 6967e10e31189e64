//! Infrastructure layer for the storefront client.
//!
//! Contains the adapters that implement the application-layer traits with
//! real I/O.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `storefront_core`, but the application layer only sees it through traits.
//!
//! # Sub-modules
//!
//! - **`history`** – In-memory [`History`](crate::application::History) used
//!   by the headless shell.
//!
//! - **`network`** – `reqwest`-backed [`ApiClient`](crate::application::ApiClient)
//!   for the remote storefront API.
//!
//! - **`storage`** – The durable token slot (a JSON file under the platform
//!   data directory), an in-memory slot for tests, and the TOML
//!   configuration file.

pub mod history;
pub mod network;
pub mod storage;
