#![forbid(unsafe_code)]

//! Repositioning the trigger by dragging.
//!
//! [`DragController`] reads the translation accumulated by the
//! [`GestureRecognizer`], adds it to the trigger's center, and resets the
//! recognizer's reference point. Reading and resetting together means each
//! delta is applied exactly once however events were batched.
//!
//! # Invariants
//!
//! 1. Only pan gestures move the trigger; taps never do.
//! 2. The trigger's net displacement over a drag equals the pointer's net
//!    movement after the pan began.
//! 3. No clamping: the trigger may leave the visible area and can be dragged
//!    back.

use envswitch_core::geometry::Point;
use envswitch_core::gesture::{Gesture, GestureRecognizer};

use crate::trigger::Trigger;

/// Applies pan translation to the trigger.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    dragging: bool,
    applied: Point,
}

impl DragController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true between a pan's begin and end.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Net offset applied during the current (or last) drag.
    #[must_use]
    pub fn applied(&self) -> Point {
        self.applied
    }

    /// React to a recognized gesture.
    ///
    /// Returns the offset applied to the trigger, if any.
    pub fn handle(
        &mut self,
        gesture: Gesture,
        recognizer: &mut GestureRecognizer,
        trigger: &mut Trigger,
    ) -> Option<Point> {
        match gesture {
            Gesture::PanBegan => {
                self.dragging = true;
                self.applied = Point::ZERO;
                Some(self.consume(recognizer, trigger))
            }
            Gesture::PanChanged => Some(self.consume(recognizer, trigger)),
            Gesture::PanEnded | Gesture::PanCancelled => {
                let offset = self.consume(recognizer, trigger);
                self.dragging = false;
                tracing::trace!(
                    dx = self.applied.x,
                    dy = self.applied.y,
                    "trigger drag finished"
                );
                Some(offset)
            }
            Gesture::Tap(_) => None,
        }
    }

    fn consume(&mut self, recognizer: &mut GestureRecognizer, trigger: &mut Trigger) -> Point {
        let offset = recognizer.translation();
        recognizer.reset_translation();
        trigger.translate(offset);
        self.applied += offset;
        offset
    }
}
