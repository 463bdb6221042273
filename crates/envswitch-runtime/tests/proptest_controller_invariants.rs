//! Property-based invariant tests for the environment controller.
//!
//! 1. However pointer moves are batched, a drag moves the trigger by the
//!    pointer's net movement.
//! 2. Any interleaving of activations and responses keeps at most one overlay
//!    surface on screen, and `Idle` always means nothing of ours is shown.
//! 3. Whatever is selected last is what the store reports.

use std::sync::Arc;

use envswitch_core::catalog::{Environment, EnvironmentCatalog};
use envswitch_core::geometry::Point;
use envswitch_core::store::MemoryStore;
use envswitch_runtime::controller::{ControllerConfig, EnvironmentController};
use envswitch_runtime::simulator::{RecordingPresenter, drag};
use envswitch_widgets::presenter::PresentationState;
use envswitch_widgets::surface::SurfaceResponse;
use proptest::prelude::*;

envswitch_core::environments! {
    enum Backend {
        Production => "https://production.server.com/",
        Staging => "https://staging.server.com/",
        Development => "https://development.server.com",
        Local => "https://10.0.1.1/",
        Edge => "edge.server.com",
    }
}

fn controller() -> EnvironmentController<Backend, RecordingPresenter> {
    let mut c = EnvironmentController::new(
        RecordingPresenter::new(),
        Arc::new(MemoryStore::new()),
        ControllerConfig::default(),
        |_: Backend| {},
    )
    .unwrap();
    c.tick();
    c
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Activate,
    Choose(usize),
    Dismiss,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Activate),
        (0usize..8).prop_map(Action::Choose),
        Just(Action::Dismiss),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Drag translation is never double-applied
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_moves_trigger_by_net_delta(
        deltas in prop::collection::vec((-10i8..=10, -10i8..=10), 0..30),
    ) {
        let mut c = controller();
        let before = c.trigger().unwrap().center();

        // Leave the slop first so the contact is a drag, not a tap.
        let mut path = vec![Point::new(5.0, 0.0)];
        path.extend(
            deltas
                .iter()
                .map(|(dx, dy)| Point::new(f32::from(*dx), f32::from(*dy))),
        );
        let net = path.iter().fold(Point::ZERO, |acc, d| acc + *d);

        drag(&mut c, before, &path);
        prop_assert_eq!(c.trigger().unwrap().center() - before, net);
        prop_assert_eq!(c.presentation_state(), PresentationState::Idle);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. At most one overlay surface
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn never_presents_twice(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut c = controller();
        for action in actions {
            match action {
                Action::Activate => {
                    c.activate();
                }
                Action::Choose(i) => {
                    c.respond(SurfaceResponse::Chose(i));
                }
                Action::Dismiss => {
                    c.respond(SurfaceResponse::Dismissed);
                }
            }
            prop_assert!(c.top_presenter().depth() <= 1);
            let idle = c.presentation_state() == PresentationState::Idle;
            prop_assert_eq!(idle, c.top_presenter().depth() == 0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Last selection wins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn saved_environment_tracks_last_choice(choices in prop::collection::vec(0usize..5, 1..10)) {
        let mut c = controller();
        let catalog = EnvironmentCatalog::<Backend>::new().unwrap();
        for &index in &choices {
            c.activate();
            c.respond(SurfaceResponse::Chose(index));
            c.respond(SurfaceResponse::Dismissed);
        }
        let last = catalog.get(*choices.last().unwrap()).unwrap();
        prop_assert_eq!(c.saved_environment(), last.identifier());
    }
}
