//! Route table domain entity.
//!
//! The route table is an ordered list of `path → view` mappings fixed at
//! startup.  Resolution is exact, case-sensitive string equality: there is no
//! pattern or parameter matching.  When two entries share a path the first
//! registered one wins and the later one is reported as shadowed.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Identifies a view the shell can mount.
///
/// The set is closed: every route in the table maps to one of these, and
/// [`ViewId::NotFound`] is the fallback the router mounts for unknown paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    /// Landing page with product search.
    Home,
    Login,
    Register,
    Cart,
    Profile,
    /// Landing target for an external auth provider redirect.
    AuthCallback,
    /// Fallback for paths with no route entry.
    NotFound,
}

impl ViewId {
    /// Stable kebab-case name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Login => "login",
            ViewId::Register => "register",
            ViewId::Cart => "cart",
            ViewId::Profile => "profile",
            ViewId::AuthCallback => "auth-callback",
            ViewId::NotFound => "not-found",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by route resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// No entry in the table has exactly this path.
    #[error("no route matches path '{path}'")]
    RouteNotFound { path: String },
}

/// A single URL-path-to-view mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    pub view: ViewId,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, view: ViewId) -> Self {
        Self {
            path: path.into(),
            view,
        }
    }
}

/// Ordered, immutable set of route entries.
///
/// # Example
///
/// ```rust
/// use storefront_core::{RouteTable, ViewId};
///
/// let table = RouteTable::storefront();
/// assert_eq!(table.resolve("/cart"), Ok(ViewId::Cart));
/// assert!(table.resolve("/Cart").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Builds a table from `entries` in registration order.
    ///
    /// Duplicate paths are kept so the table reflects what was registered,
    /// but only the first one is reachable through [`RouteTable::resolve`].
    /// Each shadowed duplicate is logged at `warn`.
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        let table = Self { entries };
        for shadowed in table.shadowed() {
            warn!(
                "route '{}' → {} is shadowed by an earlier entry",
                shadowed.path, shadowed.view
            );
        }
        table
    }

    /// The storefront's fixed route table.
    pub fn storefront() -> Self {
        Self::new(vec![
            RouteEntry::new("/", ViewId::Home),
            RouteEntry::new("/login", ViewId::Login),
            RouteEntry::new("/register", ViewId::Register),
            RouteEntry::new("/cart", ViewId::Cart),
            RouteEntry::new("/profile", ViewId::Profile),
            RouteEntry::new("/auth/callback", ViewId::AuthCallback),
        ])
    }

    /// Resolves `path` to the view of the first entry with an identical path.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::RouteNotFound`] when no entry matches.
    pub fn resolve(&self, path: &str) -> Result<ViewId, RouteError> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.view)
            .ok_or_else(|| RouteError::RouteNotFound {
                path: path.to_string(),
            })
    }

    /// Returns the entries in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Returns the entries that can never be resolved because an earlier
    /// entry has the same path.
    pub fn shadowed(&self) -> Vec<&RouteEntry> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, entry)| self.entries[..*i].iter().any(|e| e.path == entry.path))
            .map(|(_, entry)| entry)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::storefront()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
