#![forbid(unsafe_code)]

//! EnvSwitch public facade crate.
//!
//! An always-on-top floating trigger that lets a developer switch a running
//! application between named backend environments. The choice is persisted
//! and takes effect on the next launch.
//!
//! ```ignore
//! use envswitch::prelude::*;
//!
//! envswitch::environments! {
//!     pub enum Backend {
//!         Production => "https://production.server.com/",
//!         Staging => "https://staging.server.com/",
//!     }
//! }
//!
//! let mut switcher = EnvironmentController::<Backend, _>::new(
//!     my_top_presenter,
//!     std::sync::Arc::new(MemoryStore::new()),
//!     ControllerConfig::default(),
//!     |backend| println!("next launch uses {}", backend.identifier()),
//! )?;
//! let active = switcher.saved_variant();
//! ```

// --- Core re-exports -------------------------------------------------------

pub use envswitch_core::catalog::{CatalogError, Environment, EnvironmentCatalog};
pub use envswitch_core::environments;
pub use envswitch_core::event::{PointerEvent, PointerPhase};
pub use envswitch_core::geometry::{Insets, Point, Rect, Size};
pub use envswitch_core::gesture::GestureConfig;
pub use envswitch_core::selection::{SELECTION_KEY, SelectionStore};
#[cfg(feature = "file-store")]
pub use envswitch_core::store::FileStore;
pub use envswitch_core::store::{KeyValueStore, MemoryStore, StorageError, StorageResult};

// --- Widget re-exports -----------------------------------------------------

pub use envswitch_widgets::presenter::{Activation, PresentationState};
pub use envswitch_widgets::surface::{
    ItemRole, Surface, SurfaceCopy, SurfaceItem, SurfaceKind, SurfaceResponse, SurfaceStyle,
    TopPresenter,
};
pub use envswitch_widgets::trigger::{
    ImageHandle, ImageResolver, Trigger, TriggerAppearance, TriggerContent,
};

// --- Runtime re-exports ----------------------------------------------------

pub use envswitch_runtime::controller::{
    ControllerConfig, ControllerError, ControllerResult, EnvironmentController,
    PointerDisposition,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ControllerConfig, ControllerError, Environment, EnvironmentController, KeyValueStore,
        MemoryStore, PointerEvent, PresentationState, Surface, SurfaceResponse, TopPresenter,
        TriggerAppearance,
    };

    #[cfg(feature = "file-store")]
    pub use crate::FileStore;

    pub use crate::{core, runtime, widgets};
}

pub use envswitch_core as core;
pub use envswitch_runtime as runtime;
#[cfg(feature = "term")]
pub use envswitch_term as term;
pub use envswitch_widgets as widgets;
