#![forbid(unsafe_code)]

//! The persisted selection record.
//!
//! [`SelectionStore`] wraps an injected [`KeyValueStore`] and owns the one
//! reserved key under which the active environment's identifying string is
//! kept. Clones share the same backend.

use std::fmt;
use std::sync::Arc;

use crate::store::{KeyValueStore, StorageResult};

/// Reserved key of the selection record.
pub const SELECTION_KEY: &str = "CURRENT_SAVED_ENVIRONMENT";

/// Reads and writes the active environment's identifying string.
#[derive(Clone)]
pub struct SelectionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SelectionStore {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// The stored identifier, if a record exists.
    ///
    /// An empty stored value is treated as absent.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.backend.get(SELECTION_KEY).filter(|v| !v.is_empty())
    }

    /// The stored identifier, or `""` before first-run initialization.
    #[must_use]
    pub fn saved(&self) -> String {
        self.get().unwrap_or_default()
    }

    /// Overwrite the record.
    pub fn set(&self, identifier: &str) -> StorageResult<()> {
        crate::info!(
            backend = self.backend.name(),
            identifier,
            "selection record written"
        );
        self.backend.set(SELECTION_KEY, identifier)
    }

    /// First-run initialization: write `default` only if no record exists.
    ///
    /// Returns `true` if the default was written. Logging the seeding is left
    /// to the caller, which knows why the default was chosen.
    pub fn ensure_initialized(&self, default: &str) -> StorageResult<bool> {
        if self.get().is_some() {
            return Ok(false);
        }
        self.backend.set(SELECTION_KEY, default)?;
        Ok(true)
    }

    /// Name of the backing store.
    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}
