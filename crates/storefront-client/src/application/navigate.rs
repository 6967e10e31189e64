//! Router: maps navigations to views without a server round-trip.
//!
//! The router owns the route table, the history of visited paths, and the
//! current-path cell.  Every call to [`Router::navigate`] resolves the path
//! and returns the [`Navigation`] the shell should mount.
//!
//! # Navigation generation
//!
//! Requests started from one view may complete after the user has moved on.
//! Each time the current path changes the router advances a shared
//! [`NavigationGeneration`].  A use case records the generation before its
//! request and drops the response if the generation moved in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use storefront_core::{RouteTable, ViewId};
use tracing::{debug, warn};

/// Path mounted when the history has no entry at startup.
const ROOT_PATH: &str = "/";

/// Browser-style history of visited paths.
///
/// Infrastructure implementations keep entries in memory; a browser build
/// would back this with the History API.
pub trait History: Send {
    /// Appends `path` as the newest entry.
    fn push(&mut self, path: &str);

    /// Returns the newest entry, if any.
    fn current(&self) -> Option<String>;

    /// Drops the newest entry and returns the one before it.
    ///
    /// Returns `None` (and leaves the history untouched) when there is no
    /// earlier entry.
    fn back(&mut self) -> Option<String>;

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Monotonic counter advanced on every change of the current path.
#[derive(Debug, Default)]
pub struct NavigationGeneration(AtomicU64);

impl NavigationGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Advances the generation and returns the new value.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Returns `true` if no navigation happened since `generation` was read.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Result of a navigation: what the shell mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub view: ViewId,
    /// `true` if a new history entry was added.
    pub pushed: bool,
}

/// Resolves paths to views and tracks the current path.
pub struct Router {
    table: RouteTable,
    history: Box<dyn History>,
    current: String,
    generation: Arc<NavigationGeneration>,
}

impl Router {
    /// Creates a router whose current path is the history's newest entry.
    ///
    /// An empty history is seeded with `/`.
    pub fn new(table: RouteTable, mut history: Box<dyn History>) -> Self {
        let current = match history.current() {
            Some(path) => path,
            None => {
                history.push(ROOT_PATH);
                ROOT_PATH.to_string()
            }
        };
        debug!("router starting at '{current}'");
        Self {
            table,
            history,
            current,
            generation: Arc::new(NavigationGeneration::new()),
        }
    }

    /// Resolves `path` against the route table without navigating.
    ///
    /// # Errors
    ///
    /// Returns [`storefront_core::RouteError::RouteNotFound`] when no route
    /// matches.
    pub fn resolve(&self, path: &str) -> Result<ViewId, storefront_core::RouteError> {
        self.table.resolve(path)
    }

    /// Navigates to `path`.
    ///
    /// Navigating to the current path again resolves the view but adds no
    /// history entry and leaves the generation unchanged.  Unknown paths mount
    /// [`ViewId::NotFound`].
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let pushed = path != self.current;
        if pushed {
            self.history.push(path);
            self.current = path.to_string();
            self.generation.advance();
        }
        let view = self.view_for(path);
        debug!("navigate '{path}' → {view} (pushed={pushed})");
        Navigation {
            path: path.to_string(),
            view,
            pushed,
        }
    }

    /// Returns to the previous history entry, if there is one.
    pub fn back(&mut self) -> Option<Navigation> {
        let path = self.history.back()?;
        self.current = path.clone();
        self.generation.advance();
        let view = self.view_for(&path);
        debug!("back to '{path}' → {view}");
        Some(Navigation {
            path,
            view,
            pushed: false,
        })
    }

    pub fn current_path(&self) -> &str {
        &self.current
    }

    /// View for the current path, with the not-found fallback applied.
    pub fn current_view(&self) -> ViewId {
        self.table
            .resolve(&self.current)
            .unwrap_or(ViewId::NotFound)
    }

    /// Shared handle to the navigation generation.
    pub fn generation(&self) -> Arc<NavigationGeneration> {
        Arc::clone(&self.generation)
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    fn view_for(&self, path: &str) -> ViewId {
        match self.table.resolve(path) {
            Ok(view) => view,
            Err(e) => {
                warn!("{e}; mounting {}", ViewId::NotFound);
                ViewId::NotFound
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
