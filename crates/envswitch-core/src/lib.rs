#![forbid(unsafe_code)]

//! Core: environment catalog, selection persistence, geometry, and pointer gestures.

pub mod catalog;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod selection;
pub mod store;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};

pub use catalog::{CatalogError, Environment, EnvironmentCatalog};
pub use selection::{SELECTION_KEY, SelectionStore};
pub use store::{KeyValueStore, MemoryStore, StorageError, StorageResult};

#[cfg(feature = "file-store")]
pub use store::FileStore;
