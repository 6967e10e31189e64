//! Domain entities for the storefront client.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What belongs here?
//!
//! - The fixed route table and the `resolve` rule (exact path equality, first
//!   registered entry wins).
//! - The in-memory session flag and the opaque token it is projected from.
//!
//! Code in outer layers (application, infrastructure, the shell binary)
//! depends on the domain, but the domain never depends on them.  This keeps
//! routing decisions testable without a browser, a disk, or a network.

/// Route table and view identifiers.
///
/// See [`route::RouteTable`] for the main type.
pub mod route;

/// Session state and the durable token slot key.
pub mod session;
