//! Domain services: one user-facing action, one remote API call.
//!
//! Each service method builds the request body, makes exactly one
//! [`ApiClient`] call, and returns the parsed response body unchanged.  Errors
//! from the client are propagated as-is: no retries, no caching, no
//! validation beyond what the remote API performs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use storefront_core::protocol::{Credentials, OrderCreate, ProductQuery, Registration};
use storefront_core::ApiEndpoint;
use thiserror::Error;

/// Errors raised by an [`ApiClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request body could not be serialised.
    #[error("invalid request body: {0}")]
    Encode(String),

    /// The base address and path did not form a valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

/// A configured HTTP request sender with a base address.
///
/// Paths are relative to the base (e.g. `/products`).  Infrastructure
/// implementations use `reqwest`; tests use a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `GET <base><path>?<query>`.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError>;

    /// `POST <base><path>` with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Login and registration.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// `POST /auth/login`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let body = to_body(credentials)?;
        self.api.post(ApiEndpoint::AuthLogin.path(), &body).await
    }

    /// `POST /auth/register`.
    pub async fn register(&self, registration: &Registration) -> Result<Value, ApiError> {
        let body = to_body(registration)?;
        self.api.post(ApiEndpoint::AuthRegister.path(), &body).await
    }
}

/// Product search and creation.
#[derive(Clone)]
pub struct ProductService {
    api: Arc<dyn ApiClient>,
}

impl ProductService {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// `GET /products?<query>`.
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Value, ApiError> {
        self.api
            .get(ApiEndpoint::Products.path(), query.params())
            .await
    }

    /// `POST /products` with an opaque product body.
    pub async fn create_product(&self, product: &Value) -> Result<Value, ApiError> {
        self.api.post(ApiEndpoint::Products.path(), product).await
    }
}

/// Order listing and creation.
#[derive(Clone)]
pub struct OrderService {
    api: Arc<dyn ApiClient>,
}

impl OrderService {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// `GET /orders`.
    pub async fn fetch_orders(&self) -> Result<Value, ApiError> {
        self.api.get(ApiEndpoint::Orders.path(), &[]).await
    }

    /// `POST /orders`.
    pub async fn create_order(&self, order: &OrderCreate) -> Result<Value, ApiError> {
        let body = to_body(order)?;
        self.api.post(ApiEndpoint::Orders.path(), &body).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
