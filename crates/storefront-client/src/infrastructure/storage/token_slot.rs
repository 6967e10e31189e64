//! File-backed durable token slot.
//!
//! Keeps string key-value pairs in a JSON object file, by default
//! `session.json` in the platform data directory:
//! - Windows:  `%APPDATA%\Storefront\session.json`
//! - Linux:    `$XDG_DATA_HOME/storefront/session.json` (or `~/.local/share/...`)
//! - macOS:    `~/Library/Application Support/Storefront/session.json`
//!
//! ```json
//! { "authToken": "eyJhbGciOi..." }
//! ```
//!
//! Writes go to a sibling temp file which is then renamed over the slot
//! file, so a crash mid-write never leaves a truncated file behind.
//!
//! A slot file that does not parse reads as an error, but `write` and
//! `remove` replace it with a clean one instead of failing forever.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::session_store::{StorageError, TokenStore};

/// File name of the slot inside the storage directory.
pub const SLOT_FILE_NAME: &str = "session.json";

type Slots = BTreeMap<String, String>;

/// [`TokenStore`] persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Uses `dir/session.json`.  The directory is created on first write.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SLOT_FILE_NAME),
        }
    }

    /// Uses the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoPlatformDataDir`] when the base directory
    /// cannot be determined from the environment.
    pub fn platform_default() -> Result<Self, StorageError> {
        let dir = platform_data_dir().ok_or(StorageError::NoPlatformDataDir)?;
        Ok(Self::in_dir(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Slots, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Slots::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Like `load`, but a corrupt file counts as empty so the next store
    /// overwrites it.  The flag is `true` when the file was corrupt.
    fn load_for_update(&self) -> Result<(Slots, bool), StorageError> {
        match self.load() {
            Ok(slots) => Ok((slots, false)),
            Err(StorageError::Corrupt { path, source }) => {
                warn!(
                    "discarding corrupt token slot at {}: {source}",
                    path.display()
                );
                Ok((Slots::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn store(&self, slots: &Slots) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(slots).map_err(StorageError::Serialize)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("token slot written to {}", self.path.display());
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (mut slots, _) = self.load_for_update()?;
        slots.insert(key.to_string(), value.to_string());
        self.store(&slots)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let (mut slots, corrupt) = self.load_for_update()?;
        if slots.remove(key).is_none() && !corrupt {
            return Ok(());
        }
        self.store(&slots)
    }
}

/// Resolves the platform data directory including the `Storefront` subdirectory.
fn platform_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Storefront"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })?;
        Some(base.join("storefront"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Storefront")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
