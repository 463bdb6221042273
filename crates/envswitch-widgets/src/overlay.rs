#![forbid(unsafe_code)]

//! Always-on-top, input-transparent overlay surface.
//!
//! The [`OverlayHost`] sits above every layer of host content and hosts
//! exactly one [`Trigger`]. It owns no pixels of its own: hit testing
//! delegates strictly to the trigger's current frame.
//!
//! # Hit-test contract
//!
//! | Condition | Result |
//! |-----------|--------|
//! | Not attached | [`HitTarget::PassThrough`] everywhere |
//! | No trigger installed | [`HitTarget::PassThrough`] everywhere |
//! | Point inside trigger frame | [`HitTarget::Trigger`] |
//! | Any other point | [`HitTarget::PassThrough`] |
//!
//! Points outside the overlay's own bounds still hit the trigger if the
//! trigger was dragged there; the trigger frame is the only authority.

use envswitch_core::geometry::{Point, Rect};

use crate::trigger::Trigger;

/// Stacking level of the overlay; above every host layer.
pub const OVERLAY_LEVEL: u32 = u32::MAX;

/// Outcome of an overlay hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The trigger takes the event.
    Trigger,
    /// The event belongs to the host content underneath.
    PassThrough,
}

/// The overlay surface.
#[derive(Debug, Clone)]
pub struct OverlayHost {
    bounds: Rect,
    attached: bool,
    trigger: Option<Trigger>,
}

impl OverlayHost {
    /// Create a detached overlay covering `bounds`.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            attached: false,
            trigger: None,
        }
    }

    /// Make the overlay visible above host content.
    pub fn attach(&mut self) {
        if !self.attached {
            tracing::debug!(level = OVERLAY_LEVEL, "overlay attached");
        }
        self.attached = true;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Stacking level.
    #[must_use]
    pub fn level(&self) -> u32 {
        OVERLAY_LEVEL
    }

    /// Area covered by the overlay (normally the whole screen).
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Follow a screen resize. The trigger is not moved.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Install or replace the trigger, returning the previous one.
    pub fn set_trigger(&mut self, trigger: Trigger) -> Option<Trigger> {
        tracing::debug!(frame = ?trigger.frame(), "trigger installed");
        self.trigger.replace(trigger)
    }

    #[must_use]
    pub fn trigger(&self) -> Option<&Trigger> {
        self.trigger.as_ref()
    }

    pub fn trigger_mut(&mut self) -> Option<&mut Trigger> {
        self.trigger.as_mut()
    }

    /// Returns true if the overlay claims the point.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> bool {
        self.route(point) == HitTarget::Trigger
    }

    /// Decide who receives an event at `point`.
    #[must_use]
    pub fn route(&self, point: Point) -> HitTarget {
        match &self.trigger {
            Some(trigger) if self.attached && trigger.contains(point) => HitTarget::Trigger,
            _ => HitTarget::PassThrough,
        }
    }
}
