#![forbid(unsafe_code)]

//! Host-agnostic pointer events.
//!
//! Hosts translate their native mouse or touch input into [`PointerEvent`]s
//! before handing them to the overlay. Only the primary pointer is modelled;
//! secondary buttons and scroll wheels never reach the overlay.

use crate::geometry::Point;

/// Phase of a primary-pointer contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Contact started (mouse down, touch began).
    Down,
    /// Contact moved while held.
    Moved,
    /// Contact ended normally (mouse up, touch ended).
    Up,
    /// Contact was interrupted (focus loss, touch cancelled).
    Cancelled,
}

/// A primary-pointer event in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, position: Point) -> Self {
        Self { phase, position }
    }

    /// Pointer pressed at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, Point::new(x, y))
    }

    /// Pointer moved to `(x, y)` while held.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Moved, Point::new(x, y))
    }

    /// Pointer released at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, Point::new(x, y))
    }

    /// Contact cancelled at `(x, y)`.
    #[must_use]
    pub const fn cancelled(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Cancelled, Point::new(x, y))
    }

    /// Returns true for the event that starts a contact.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.phase == PointerPhase::Down
    }
}
