//! Remote API contract: endpoint paths and the request bodies the client builds.

pub mod endpoints;
pub mod messages;

pub use endpoints::ApiEndpoint;
pub use messages::{Credentials, OrderCreate, OrderProductCreate, ProductQuery, Registration};
