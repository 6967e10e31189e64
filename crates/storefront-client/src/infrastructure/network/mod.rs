//! Network infrastructure: the HTTP client for the remote storefront API.

pub mod http_client;

pub use http_client::HttpApiClient;
