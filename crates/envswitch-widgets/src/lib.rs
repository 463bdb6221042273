#![forbid(unsafe_code)]

//! Widgets: the overlay host, its floating trigger, drag handling, and the
//! selection presenter with the surfaces it shows.

pub mod drag;
pub mod overlay;
pub mod presenter;
pub mod surface;
pub mod trigger;

pub use drag::DragController;
pub use overlay::{HitTarget, OVERLAY_LEVEL, OverlayHost};
pub use presenter::{Activation, PresentationState, SelectionCallback, SelectionPresenter};
pub use surface::{
    ItemRole, Surface, SurfaceCopy, SurfaceItem, SurfaceKind, SurfaceResponse, SurfaceStyle,
    TopPresenter,
};
pub use trigger::{
    ContentMode, DEFAULT_TRIGGER_LABEL, IMAGE_CONTENT_INSET, ImageHandle, ImageResolver, NoImages,
    Rgb, Trigger, TriggerAppearance, TriggerContent, TriggerStyle,
};
