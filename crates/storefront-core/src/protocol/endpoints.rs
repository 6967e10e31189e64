//! Endpoint paths of the remote storefront API.
//!
//! Paths are relative to the configured API base address.  Every domain
//! service call maps to exactly one of these.

/// A remote API resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    /// `GET` to search, `POST` to create.
    Products,
    AuthLogin,
    AuthRegister,
    /// `GET` to list, `POST` to create.
    Orders,
}

impl ApiEndpoint {
    /// Path relative to the API base, always starting with `/`.
    pub fn path(self) -> &'static str {
        match self {
            ApiEndpoint::Products => "/products",
            ApiEndpoint::AuthLogin => "/auth/login",
            ApiEndpoint::AuthRegister => "/auth/register",
            ApiEndpoint::Orders => "/orders",
        }
    }
}
