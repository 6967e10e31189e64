//! `reqwest`-backed implementation of [`ApiClient`].
//!
//! Every request goes to `<base_url><path>`.  Responses with a 2xx status are
//! parsed as JSON (an empty body becomes `null`); anything else becomes
//! [`ApiError::Http`] carrying the status and the response text.  Nothing is
//! retried.
//!
//! When a token store is attached, the current session token (if any) is sent
//! as `Authorization: Bearer <token>` on every request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde_json::Value;
use storefront_core::AUTH_TOKEN_KEY;
use tracing::{debug, warn};

use crate::application::services::{ApiClient, ApiError};
use crate::application::session_store::TokenStore;

/// HTTP client for the remote storefront API.
#[derive(Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    token_store: Option<Arc<dyn TokenStore>>,
}

impl HttpApiClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` is not an absolute URL,
    /// or [`ApiError::Transport`] if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_store: None,
        })
    }

    /// Sends the stored session token as a bearer credential.
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Joins the base address and an endpoint path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the result does not parse.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(store) = &self.token_store else {
            return request;
        };
        match store.read(AUTH_TOKEN_KEY) {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!("could not read session token for request: {e}");
                request
            }
        }
    }
}

/// Turns a response into its JSON body, or an [`ApiError::Http`] for non-2xx.
async fn into_body(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!("could not read {status} error body: {e}");
                String::new()
            }
        };
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            text
        };
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path)?;
        debug!("GET {url}");
        let request = self.authorize(self.client.get(url).query(query));
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        into_body(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path)?;
        debug!("POST {url}");
        let request = self.authorize(self.client.post(url).json(body));
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        into_body(response).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
