#![forbid(unsafe_code)]

//! Deterministic host double for testing.
//!
//! [`RecordingPresenter`] stands in for the host's topmost presenter. It keeps
//! a stack of shown surfaces and a history of everything ever presented, so
//! tests can drive an [`EnvironmentController`](crate::EnvironmentController)
//! without a screen.
//!
//! # Example
//!
//! ```ignore
//! use envswitch_runtime::simulator::{tap, RecordingPresenter};
//!
//! let mut controller = /* EnvironmentController<_, RecordingPresenter> */;
//! controller.tick();
//! tap(&mut controller, controller.trigger().unwrap().center());
//! assert_eq!(controller.top_presenter().presented_count(), 1);
//! ```

use envswitch_core::catalog::Environment;
use envswitch_core::event::PointerEvent;
use envswitch_core::geometry::Point;
use envswitch_widgets::surface::{Surface, SurfaceKind, SurfaceStyle, TopPresenter};

use crate::controller::{EnvironmentController, PointerDisposition};

/// Topmost presenter that records instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    stack: Vec<Surface>,
    history: Vec<Surface>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the host presenting its own modal.
    pub fn push_host_surface(&mut self, title: impl Into<String>) {
        self.stack.push(Surface {
            kind: SurfaceKind::Host,
            style: SurfaceStyle::Alert,
            title: title.into(),
            message: String::new(),
            items: Vec::new(),
        });
    }

    /// Simulate the host closing whatever is on top.
    pub fn pop(&mut self) -> Option<Surface> {
        self.stack.pop()
    }

    /// The surface currently on top.
    #[must_use]
    pub fn current(&self) -> Option<&Surface> {
        self.stack.last()
    }

    /// Number of surfaces shown right now.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Every surface handed to `present`, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Surface] {
        &self.history
    }

    /// Number of `present` calls so far.
    #[must_use]
    pub fn presented_count(&self) -> usize {
        self.history.len()
    }
}

impl TopPresenter for RecordingPresenter {
    fn has_active_presentation(&self) -> bool {
        !self.stack.is_empty()
    }

    fn present(&mut self, surface: Surface) {
        self.history.push(surface.clone());
        self.stack.push(surface);
    }

    fn dismiss(&mut self) {
        self.stack.pop();
    }
}

/// Press and release at `at`.
pub fn tap<E: Environment, P: TopPresenter>(
    controller: &mut EnvironmentController<E, P>,
    at: Point,
) -> PointerDisposition {
    let down = controller.handle_pointer(PointerEvent::down(at.x, at.y));
    controller.handle_pointer(PointerEvent::up(at.x, at.y));
    down
}

/// Press at `from`, move through each of `deltas` in turn, and release.
///
/// Returns the disposition of the initial press.
pub fn drag<E: Environment, P: TopPresenter>(
    controller: &mut EnvironmentController<E, P>,
    from: Point,
    deltas: &[Point],
) -> PointerDisposition {
    let down = controller.handle_pointer(PointerEvent::down(from.x, from.y));
    let mut at = from;
    for &delta in deltas {
        at += delta;
        controller.handle_pointer(PointerEvent::moved(at.x, at.y));
    }
    controller.handle_pointer(PointerEvent::up(at.x, at.y));
    down
}
