#![forbid(unsafe_code)]

//! Composition root: wires catalog, store, overlay, drag, and presenter.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use envswitch_core::MemoryStore;
//! use envswitch_runtime::controller::{ControllerConfig, EnvironmentController};
//! use envswitch_runtime::simulator::RecordingPresenter;
//!
//! envswitch_core::environments! {
//!     enum Backend {
//!         Production => "https://production.server.com/",
//!         Staging => "https://staging.server.com/",
//!     }
//! }
//!
//! let mut controller = EnvironmentController::<Backend, _>::new(
//!     RecordingPresenter::new(),
//!     Arc::new(MemoryStore::new()),
//!     ControllerConfig::default().with_label("ENV"),
//!     |env| println!("switched to {env:?}"),
//! )?;
//! controller.tick(); // trigger installed and styled on the next UI cycle
//! ```
//!
//! # Construction order
//!
//! 1. Attach the overlay.
//! 2. First-run initialization of the selection record.
//! 3. Post trigger installation and styling to the next UI cycle.
//! 4. Wire drag handling and activation (pointer routing below).
//!
//! # Pointer routing
//!
//! A press that lands on the trigger starts a contact that the controller
//! owns until release, even if the pointer leaves the trigger. Every other
//! event is reported as [`PointerDisposition::PassThrough`] for the host.
//! A new press while a contact is still open cancels that contact first, so
//! a lost release never captures presses outside the trigger.

use std::fmt;
use std::sync::Arc;

use envswitch_core::catalog::{CatalogError, Environment, EnvironmentCatalog};
use envswitch_core::event::PointerEvent;
use envswitch_core::geometry::{Point, Rect, Size};
use envswitch_core::gesture::{Gesture, GestureConfig, GestureRecognizer};
use envswitch_core::selection::SelectionStore;
use envswitch_core::store::{KeyValueStore, StorageError};
use envswitch_widgets::drag::DragController;
use envswitch_widgets::overlay::OverlayHost;
use envswitch_widgets::presenter::{Activation, PresentationState, SelectionPresenter};
use envswitch_widgets::surface::{SurfaceCopy, SurfaceResponse, TopPresenter};
use envswitch_widgets::trigger::{ImageHandle, ImageResolver, NoImages, Trigger, TriggerAppearance};

use crate::ui_queue::UiQueue;

/// Default top-left corner of the trigger.
pub const DEFAULT_TRIGGER_ORIGIN: Point = Point::new(20.0, 20.0);

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Fatal configuration errors raised at construction.
#[derive(Debug)]
pub enum ControllerError {
    /// The environment set is empty or has clashing identifiers.
    Catalog(CatalogError),
    /// First-run initialization could not write the default selection.
    Storage(StorageError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Catalog(e) => write!(f, "invalid environment catalog: {e}"),
            ControllerError::Storage(e) => write!(f, "selection store unavailable: {e}"),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Catalog(e) => Some(e),
            ControllerError::Storage(e) => Some(e),
        }
    }
}

impl From<CatalogError> for ControllerError {
    fn from(e: CatalogError) -> Self {
        ControllerError::Catalog(e)
    }
}

impl From<StorageError> for ControllerError {
    fn from(e: StorageError) -> Self {
        ControllerError::Storage(e)
    }
}

/// Result type for controller construction.
pub type ControllerResult<T> = Result<T, ControllerError>;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for [`EnvironmentController`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Trigger appearance (default: the `"EN"` label).
    pub appearance: TriggerAppearance,
    /// Trigger's top-left corner at startup (default: `(20, 20)`).
    pub origin: Point,
    /// Overlay bounds; normally the host screen.
    pub screen: Rect,
    /// Tap/drag recognition.
    pub gesture: GestureConfig,
    /// Surface texts.
    pub copy: SurfaceCopy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            appearance: TriggerAppearance::default(),
            origin: DEFAULT_TRIGGER_ORIGIN,
            screen: Rect::default(),
            gesture: GestureConfig::default(),
            copy: SurfaceCopy::default(),
        }
    }
}

impl ControllerConfig {
    /// Use a text label trigger.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.appearance = TriggerAppearance::Label(label.into());
        self
    }

    /// Use an already loaded image.
    #[must_use]
    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.appearance = TriggerAppearance::Image(image);
        self
    }

    /// Use an image looked up by name when the trigger is styled.
    #[must_use]
    pub fn with_named_image(mut self, name: impl Into<String>) -> Self {
        self.appearance = TriggerAppearance::NamedImage(name.into());
        self
    }

    /// Place the trigger's top-left corner.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the overlay bounds.
    #[must_use]
    pub fn with_screen(mut self, screen: Rect) -> Self {
        self.screen = screen;
        self
    }

    /// Movement needed before a press becomes a drag.
    #[must_use]
    pub fn with_drag_slop(mut self, slop: f32) -> Self {
        self.gesture = self.gesture.with_slop(slop);
        self
    }

    /// Replace the surface texts.
    #[must_use]
    pub fn with_copy(mut self, copy: SurfaceCopy) -> Self {
        self.copy = copy;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Work deferred to the next UI cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTask {
    /// Create the trigger and install it into the overlay.
    InstallTrigger,
    /// Style the installed trigger from its appearance.
    ApplyAppearance,
}

/// Who handled a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDisposition {
    /// The overlay took the event.
    Consumed,
    /// The event belongs to the host content.
    PassThrough,
}

/// The environment switcher.
pub struct EnvironmentController<E: Environment, P: TopPresenter> {
    store: SelectionStore,
    overlay: OverlayHost,
    gestures: GestureRecognizer,
    drag: DragController,
    presenter: SelectionPresenter<E>,
    top: P,
    queue: UiQueue<UiTask>,
    appearance: TriggerAppearance,
    origin: Point,
    images: Box<dyn ImageResolver>,
    pending_size: Option<Size>,
}

impl<E: Environment, P: TopPresenter> EnvironmentController<E, P> {
    /// Build a controller over every variant of `E`.
    ///
    /// Fails on an invalid catalog or when first-run initialization cannot
    /// write the default selection.
    pub fn new(
        top: P,
        backend: Arc<dyn KeyValueStore>,
        config: ControllerConfig,
        on_select: impl FnMut(E) + 'static,
    ) -> ControllerResult<Self> {
        let catalog = EnvironmentCatalog::new()?;
        Self::with_catalog(catalog, top, backend, config, on_select)
    }

    /// Build a controller over an explicit catalog.
    pub fn with_catalog(
        catalog: EnvironmentCatalog<E>,
        top: P,
        backend: Arc<dyn KeyValueStore>,
        config: ControllerConfig,
        on_select: impl FnMut(E) + 'static,
    ) -> ControllerResult<Self> {
        let mut overlay = OverlayHost::new(config.screen);
        overlay.attach();

        let store = SelectionStore::new(backend);
        let default = catalog.default_variant();
        if store.ensure_initialized(default.identifier())? {
            tracing::info!(
                backend = store.backend_name(),
                identifier = default.identifier(),
                "selection record initialized to default environment"
            );
        }

        let mut queue = UiQueue::new();
        queue.post(UiTask::InstallTrigger);
        queue.post(UiTask::ApplyAppearance);

        let presenter =
            SelectionPresenter::new(catalog, store.clone(), config.copy, Box::new(on_select));

        Ok(Self {
            store,
            overlay,
            gestures: GestureRecognizer::new(config.gesture),
            drag: DragController::new(),
            presenter,
            top,
            queue,
            appearance: config.appearance,
            origin: config.origin,
            images: Box::new(NoImages),
            pending_size: None,
        })
    }

    /// Resolver used for [`TriggerAppearance::NamedImage`].
    #[must_use]
    pub fn with_image_resolver(mut self, images: impl ImageResolver + 'static) -> Self {
        self.images = Box::new(images);
        self
    }

    /// Run one UI cycle of deferred work. Returns the number of tasks run.
    pub fn tick(&mut self) -> usize {
        let batch = self.queue.begin_cycle();
        let count = batch.len();
        for task in batch {
            self.run(task);
        }
        count
    }

    fn run(&mut self, task: UiTask) {
        match task {
            UiTask::InstallTrigger => {
                let mut trigger = Trigger::new(self.appearance.clone(), self.origin);
                if let Some(size) = self.pending_size.take() {
                    trigger.resize(size.width, size.height);
                }
                self.overlay.set_trigger(trigger);
            }
            UiTask::ApplyAppearance => {
                if let Some(trigger) = self.overlay.trigger_mut() {
                    trigger.apply_appearance(self.images.as_ref());
                }
            }
        }
    }

    /// Returns true while deferred work is waiting for [`tick`](Self::tick).
    #[must_use]
    pub fn has_pending_tasks(&self) -> bool {
        !self.queue.is_idle()
    }

    /// Route a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerDisposition {
        if event.is_down() {
            // A new press means the previous contact's release was lost.
            if self.gestures.is_tracking() {
                self.cancel_contact(event.position);
            }
            if !self.overlay.hit_test(event.position) {
                return PointerDisposition::PassThrough;
            }
        } else if !self.gestures.is_tracking() {
            return PointerDisposition::PassThrough;
        }
        if let Some(gesture) = self.gestures.handle(event) {
            self.on_gesture(gesture);
        }
        PointerDisposition::Consumed
    }

    fn cancel_contact(&mut self, at: Point) {
        tracing::debug!(x = at.x, y = at.y, "stale trigger contact cancelled");
        if let Some(gesture) = self.gestures.handle(PointerEvent::cancelled(at.x, at.y)) {
            self.on_gesture(gesture);
        }
    }

    fn on_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Tap(at) => {
                // Released outside the trigger: not an activation.
                if self.overlay.hit_test(at) {
                    self.activate();
                }
            }
            _ => {
                if let Some(trigger) = self.overlay.trigger_mut() {
                    self.drag.handle(gesture, &mut self.gestures, trigger);
                }
            }
        }
    }

    /// Activate the trigger: present the choice list unless something is
    /// already presented.
    pub fn activate(&mut self) -> Activation {
        self.presenter.activate(&mut self.top)
    }

    /// Forward the user's answer to the shown surface.
    pub fn respond(&mut self, response: SurfaceResponse) -> Option<E> {
        self.presenter.respond(response, &mut self.top)
    }

    /// Identifying string of the saved environment, or `""` if none.
    #[must_use]
    pub fn saved_environment(&self) -> String {
        self.store.saved()
    }

    /// The saved environment resolved against the catalog.
    #[must_use]
    pub fn saved_variant(&self) -> Option<E> {
        self.presenter.catalog().find(&self.store.saved())
    }

    /// Resize the trigger; content insets become the mean of both sides.
    ///
    /// Before the trigger is installed the size is remembered and applied
    /// at installation.
    pub fn resize(&mut self, width: f32, height: f32) {
        match self.overlay.trigger_mut() {
            Some(trigger) => trigger.resize(width, height),
            None => self.pending_size = Some(Size::new(width, height)),
        }
    }

    /// Follow a host screen resize.
    pub fn set_screen(&mut self, screen: Rect) {
        self.overlay.set_bounds(screen);
    }

    #[must_use]
    pub fn trigger(&self) -> Option<&Trigger> {
        self.overlay.trigger()
    }

    #[must_use]
    pub fn overlay(&self) -> &OverlayHost {
        &self.overlay
    }

    #[must_use]
    pub fn presentation_state(&self) -> PresentationState {
        self.presenter.state()
    }

    #[must_use]
    pub fn catalog(&self) -> &EnvironmentCatalog<E> {
        self.presenter.catalog()
    }

    #[must_use]
    pub fn top_presenter(&self) -> &P {
        &self.top
    }

    pub fn top_presenter_mut(&mut self) -> &mut P {
        &mut self.top
    }
}

impl<E: Environment, P: TopPresenter> fmt::Debug for EnvironmentController<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentController")
            .field("store", &self.store)
            .field("overlay", &self.overlay)
            .field("presenter", &self.presenter)
            .field("pending_tasks", &self.queue.pending())
            .finish()
    }
}
