//! Property-based invariant tests for gesture recognition and catalogs.
//!
//! 1. Translation read in arbitrary batches sums to the pointer's net
//!    movement once a pan began, and to zero otherwise.
//! 2. A contact that never leaves the slop produces exactly one tap.
//! 3. Any set of distinct non-empty identifiers forms a valid catalog.

use envswitch_core::event::PointerEvent;
use envswitch_core::geometry::Point;
use envswitch_core::gesture::{Gesture, GestureConfig, GestureRecognizer};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn step_strategy() -> impl Strategy<Value = (i8, i8, bool)> {
    (-20i8..=20, -20i8..=20, any::<bool>())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Batched translation reads never double-apply
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn batched_reads_sum_to_net_movement(
        steps in prop::collection::vec(step_strategy(), 1..40),
    ) {
        let mut recognizer = GestureRecognizer::default();
        let start = Point::new(100.0, 100.0);
        recognizer.handle(PointerEvent::down(start.x, start.y));

        let mut pos = start;
        let mut applied = Point::ZERO;
        for (dx, dy, read_now) in &steps {
            pos += Point::new(f32::from(*dx), f32::from(*dy));
            recognizer.handle(PointerEvent::moved(pos.x, pos.y));
            if *read_now {
                applied += recognizer.translation();
                recognizer.reset_translation();
            }
        }
        let panned = recognizer.is_panning();
        applied += recognizer.translation();
        recognizer.reset_translation();

        if panned {
            prop_assert_eq!(applied, pos - start);
        } else {
            prop_assert_eq!(applied, Point::ZERO);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Contacts inside the slop are taps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn small_jitter_is_single_tap(
        jitter in prop::collection::vec((-1i8..=1, -1i8..=1), 0..10),
    ) {
        let mut recognizer = GestureRecognizer::new(GestureConfig::default().with_slop(2.0));
        recognizer.handle(PointerEvent::down(10.0, 10.0));
        for (dx, dy) in &jitter {
            let out = recognizer.handle(PointerEvent::moved(
                10.0 + f32::from(*dx),
                10.0 + f32::from(*dy),
            ));
            prop_assert_eq!(out, None);
        }
        let end = recognizer.handle(PointerEvent::up(10.0, 10.0));
        prop_assert_eq!(end, Some(Gesture::Tap(Point::new(10.0, 10.0))));
        prop_assert!(!recognizer.is_tracking());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Distinct identifiers always validate
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot(usize);

const NAMES: [&str; 6] = ["prod", "stage", "dev", "test", "edge", "local"];

impl envswitch_core::Environment for Slot {
    const ALL: &'static [Self] = &[Slot(0), Slot(1), Slot(2), Slot(3), Slot(4), Slot(5)];

    fn identifier(&self) -> &str {
        NAMES[self.0]
    }
}

proptest! {
    #[test]
    fn distinct_subsets_validate(picks in prop::sample::subsequence((0..6).collect::<Vec<_>>(), 1..=6)) {
        let catalog = envswitch_core::EnvironmentCatalog::from_variants(
            picks.iter().map(|&i| Slot(i)),
        ).unwrap();
        prop_assert_eq!(catalog.len(), picks.len());
        prop_assert_eq!(catalog.default_variant(), Slot(picks[0]));
        for &i in &picks {
            prop_assert_eq!(catalog.find(NAMES[i]), Some(Slot(i)));
        }
    }
}
