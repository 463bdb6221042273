#![forbid(unsafe_code)]

//! Injected key-value persistence.
//!
//! The selection record lives in a host-supplied [`KeyValueStore`]. Two
//! backends ship with the crate:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       KeyValueStore                           │
//! │   - MemoryStore: in-memory (testing, ephemeral)               │
//! │   - FileStore: JSON file (requires file-store)                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Invariants
//!
//! 1. **Reads never fail**: `get` returns `None` for missing keys and for
//!    backends that could not be read.
//! 2. **Atomic writes**: file storage uses the write-rename pattern.
//! 3. **Write-through cache**: a failed file write still updates the
//!    in-memory view, so the running process sees the new value.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | `set` returns error, cache updated |
//! | `StorageError::Serialization` | Unparsable JSON | `FileStore::open` fails |
//! | `StorageError::Corruption` | Poisoned lock | Operation returns error |
//! | Missing key | First run | `get` returns `None` |

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur while writing to a store.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
    /// Store is in an unusable state.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(_) | StorageError::Corruption(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Store Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A process-wide persistent string key-value surface.
///
/// Implementations must be fast and non-blocking from the caller's point of
/// view; they are called from the UI context.
pub trait KeyValueStore: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read a value. Never fails; a missing or unreadable key is `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value durably.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Store (always available)
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store for tests and hosts that do not persist.
///
/// Values are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store pre-populated with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.data.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Store (requires file-store feature)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "file-store")]
mod file_store {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    /// On-disk format.
    #[derive(Serialize, Deserialize)]
    struct StoreFile {
        /// Format version for future migrations.
        format_version: u32,
        entries: HashMap<String, String>,
    }

    impl StoreFile {
        const FORMAT_VERSION: u32 = 1;
    }

    /// JSON file-backed store.
    ///
    /// The whole file is loaded on [`FileStore::open`] and kept in memory;
    /// every `set` rewrites the file atomically.
    ///
    /// # File Format
    ///
    /// ```json
    /// {
    ///   "format_version": 1,
    ///   "entries": {
    ///     "CURRENT_SAVED_ENVIRONMENT": "https://staging.server.com/"
    ///   }
    /// }
    /// ```
    ///
    /// # Atomic Writes
    ///
    /// 1. Write to `{path}.tmp`
    /// 2. Flush and sync
    /// 3. Rename `{path}.tmp` -> `{path}`
    pub struct FileStore {
        path: PathBuf,
        cache: RwLock<HashMap<String, String>>,
    }

    impl FileStore {
        /// Open a store at `path`, loading existing entries.
        ///
        /// A missing file is a first run and yields an empty store. A file
        /// written by a different format version is ignored with a warning.
        pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
            let path = path.as_ref().to_path_buf();
            let entries = load_entries(&path)?;
            crate::debug!(path = %path.display(), entries = entries.len(), "file store opened");
            Ok(Self {
                path,
                cache: RwLock::new(entries),
            })
        }

        /// Default location for an application.
        ///
        /// Uses `$XDG_STATE_HOME/envswitch/{app_name}/state.json`, falling back
        /// to `~/.local/state`, then the current directory.
        #[must_use]
        pub fn default_path_for_app(app_name: &str) -> PathBuf {
            state_dir_or_fallback()
                .join("envswitch")
                .join(app_name)
                .join("state.json")
        }

        /// Path of the backing file.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone();
            tmp.set_extension("json.tmp");
            tmp
        }

        fn write_file(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }

            let file = StoreFile {
                format_version: StoreFile::FORMAT_VERSION,
                entries: entries.clone(),
            };

            let tmp = self.temp_path();
            {
                let handle = File::create(&tmp)?;
                let mut writer = BufWriter::new(handle);
                serde_json::to_writer_pretty(&mut writer, &file)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    fn load_entries(path: &Path) -> StorageResult<HashMap<String, String>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let file: StoreFile = serde_json::from_reader(reader).map_err(|e| {
            StorageError::Serialization(format!("failed to parse store file: {e}"))
        })?;

        if file.format_version != StoreFile::FORMAT_VERSION {
            crate::warn!(
                stored = file.format_version,
                expected = StoreFile::FORMAT_VERSION,
                "store file format version mismatch, ignoring stored entries"
            );
            return Ok(HashMap::new());
        }
        Ok(file.entries)
    }

    fn state_dir_or_fallback() -> PathBuf {
        if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
            return PathBuf::from(state_home);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local").join("state");
        }
        PathBuf::from(".")
    }

    impl KeyValueStore for FileStore {
        fn name(&self) -> &str {
            "FileStore"
        }

        fn get(&self, key: &str) -> Option<String> {
            self.cache.read().ok()?.get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            let snapshot = {
                let mut guard = self
                    .cache
                    .write()
                    .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
                guard.insert(key.to_string(), value.to_string());
                guard.clone()
            };
            self.write_file(&snapshot)
        }
    }

    impl fmt::Debug for FileStore {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStore")
                .field("path", &self.path)
                .finish()
        }
    }
}

#[cfg(feature = "file-store")]
pub use file_store::FileStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_with_entries() {
        let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(store.get("b").as_deref(), Some("2"));
        assert_eq!(format!("{store:?}"), "MemoryStore { entries: 2 }");
    }

    #[test]
    fn storage_error_display() {
        let err = StorageError::from(std::io::Error::other("disk gone"));
        assert!(err.to_string().starts_with("I/O error"));
        assert!(std::error::Error::source(&err).is_some());
        let err = StorageError::Corruption("bad".into());
        assert_eq!(err.to_string(), "storage corruption: bad");
    }

    #[cfg(feature = "file-store")]
    mod file {
        use super::super::*;

        #[test]
        fn missing_file_is_first_run() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::open(dir.path().join("state.json")).unwrap();
            assert_eq!(store.get("k"), None);
        }

        #[test]
        fn values_survive_reopen() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("state.json");
            {
                let store = FileStore::open(&path).unwrap();
                store.set("k", "v").unwrap();
            }
            let reopened = FileStore::open(&path).unwrap();
            assert_eq!(reopened.get("k").as_deref(), Some("v"));
            assert!(!path.with_extension("json.tmp").exists());
        }

        #[test]
        fn garbage_file_fails_to_open() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("state.json");
            std::fs::write(&path, "not json").unwrap();
            let err = FileStore::open(&path).unwrap_err();
            assert!(matches!(err, StorageError::Serialization(_)));
        }

        #[test]
        fn version_mismatch_starts_empty() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("state.json");
            std::fs::write(&path, r#"{"format_version": 99, "entries": {"k": "v"}}"#).unwrap();
            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.get("k"), None);
        }
    }
}
