//! Request bodies sent to the remote API.
//!
//! Response shapes are owned by the remote service and are not modelled here;
//! the client passes them through as opaque JSON.  Field names on the wire
//! follow the remote API's camelCase convention.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProductCreate {
    pub product_id: String,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub products: Vec<OrderProductCreate>,
    /// Left to the server's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Query string parameters for `GET /products`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    params: Vec<(String, String)>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.  Repeated keys are sent repeatedly.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<(String, String)> for ProductQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
