//! Storage infrastructure: token slot and configuration file persistence.
//!
//! - `token_slot` keeps the session token in a small JSON file that survives
//!   restarts, the local equivalent of browser persistent storage.
//! - `memory` is the in-process slot used by tests and `--ephemeral` runs.
//! - `config` reads and writes the TOML configuration file.

pub mod config;
pub mod memory;
pub mod token_slot;

pub use memory::MemoryTokenStore;
pub use token_slot::FileTokenStore;
