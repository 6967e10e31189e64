//! In-memory navigation history.
//!
//! Stands in for the browser's session history: a stack of visited paths
//! where the newest entry is the current location.

use crate::application::navigate::History;

/// Vector-backed [`History`].
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
}

impl MemoryHistory {
    /// Creates a history whose only entry is `initial` (the start path).
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
        }
    }

    /// Creates a history with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn push(&mut self, path: &str) {
        self.entries.push(path.to_string());
    }

    fn current(&self) -> Option<String> {
        self.entries.last().cloned()
    }

    fn back(&mut self) -> Option<String> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.current()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_has_start_path() {
        let history = MemoryHistory::new("/cart");
        assert_eq!(history.current().as_deref(), Some("/cart"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_push_then_back() {
        let mut history = MemoryHistory::new("/");
        history.push("/login");
        history.push("/register");

        assert_eq!(history.back().as_deref(), Some("/login"));
        assert_eq!(history.entries(), &["/".to_string(), "/login".to_string()]);
    }

    #[test]
    fn test_back_never_empties_history() {
        let mut history = MemoryHistory::new("/");
        assert_eq!(history.back(), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_empty_history() {
        let mut history = MemoryHistory::empty();
        assert!(history.is_empty());
        assert_eq!(history.current(), None);
        assert_eq!(history.back(), None);
    }
}
