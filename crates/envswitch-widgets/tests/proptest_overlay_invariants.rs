//! Property-based invariant tests for the overlay and trigger dragging.
//!
//! 1. The overlay claims a point iff it lies inside the trigger's frame,
//!    wherever the trigger has been moved.
//! 2. A drag moves the trigger by exactly the pointer's travel from the
//!    press once the slop was exceeded, and not at all otherwise.

use envswitch_core::event::PointerEvent;
use envswitch_core::geometry::{Point, Rect};
use envswitch_core::gesture::GestureRecognizer;
use envswitch_widgets::drag::DragController;
use envswitch_widgets::overlay::{HitTarget, OverlayHost};
use envswitch_widgets::trigger::{NoImages, Trigger, TriggerAppearance};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn trigger_at(origin: Point) -> Trigger {
    let mut trigger = Trigger::new(TriggerAppearance::default(), origin);
    trigger.apply_appearance(&NoImages);
    trigger
}

fn coord() -> impl Strategy<Value = i16> {
    -50i16..=150
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Hit testing follows the trigger
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlay_claims_exactly_trigger_frame(
        (ox, oy) in (coord(), coord()),
        (dx, dy) in (-40i16..=40, -40i16..=40),
        (px, py) in (coord(), coord()),
    ) {
        let mut host = OverlayHost::new(Rect::new(0.0, 0.0, 100.0, 40.0));
        host.attach();
        host.set_trigger(trigger_at(Point::new(f32::from(ox), f32::from(oy))));
        if let Some(trigger) = host.trigger_mut() {
            trigger.translate(Point::new(f32::from(dx), f32::from(dy)));
        }

        let point = Point::new(f32::from(px) + 0.5, f32::from(py) + 0.5);
        let inside = host.trigger().is_some_and(|t| t.frame().contains(point));
        let expected = if inside { HitTarget::Trigger } else { HitTarget::PassThrough };
        prop_assert_eq!(host.route(point), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Drag displacement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_moves_by_travel_past_slop(
        steps in prop::collection::vec((-10i8..=10, -10i8..=10), 0..30),
    ) {
        let mut recognizer = GestureRecognizer::default();
        let mut drag = DragController::new();
        let mut trigger = trigger_at(Point::new(20.0, 20.0));
        let before = trigger.frame().origin();

        let start = Point::new(21.0, 20.5);
        let mut pos = start;
        let mut exceeded_slop = false;
        recognizer.handle(PointerEvent::down(start.x, start.y));
        for (dx, dy) in &steps {
            pos += Point::new(f32::from(*dx), f32::from(*dy));
            exceeded_slop |= pos.distance_squared(start) > 1.0;
            if let Some(gesture) = recognizer.handle(PointerEvent::moved(pos.x, pos.y)) {
                drag.handle(gesture, &mut recognizer, &mut trigger);
            }
        }
        if let Some(gesture) = recognizer.handle(PointerEvent::up(pos.x, pos.y)) {
            drag.handle(gesture, &mut recognizer, &mut trigger);
        }

        let moved = trigger.frame().origin() - before;
        let expected = if exceeded_slop { pos - start } else { Point::ZERO };
        prop_assert_eq!(moved, expected);
        prop_assert!(!drag.is_dragging());
    }
}
