#![forbid(unsafe_code)]

//! The selection state machine.
//!
//! ```text
//!            activate (nothing presented)
//!   Idle ─────────────────────────────────► ChoiceShown
//!    ▲  ◄───────────── Dismissed ──────────────┘  │
//!    │                                            │ Chose(i)
//!    │                                            │  1. store.set(id)
//!    │                                            │  2. on_select(variant)
//!    │            Dismissed                       ▼
//!    └──────────────────────────────────── ConfirmationShown
//! ```
//!
//! # Invariants
//!
//! 1. At most one overlay surface is presented at a time.
//! 2. Activation is ignored, not queued, whenever the host reports an active
//!    presentation. The check and the `present` call happen in the same
//!    synchronous call, with nothing in between.
//! 3. A choice writes the store and fires the callback exactly once, both
//!    before the confirmation is presented.
//! 4. `Idle` is reachable from every shown state via `Dismissed`, or by the
//!    host closing the surface itself (noticed on the next activation).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Activation while presented | Rapid taps, host modal open | Ignored |
//! | Choice index outside catalog | Malformed host item | Ignored, state kept |
//! | Response while idle | Stale host callback | Ignored |
//! | Store write fails | Backend I/O error | Logged; selection still applied |

use std::fmt;

use envswitch_core::catalog::{Environment, EnvironmentCatalog};
use envswitch_core::selection::SelectionStore;

use crate::surface::{
    Surface, SurfaceCopy, SurfaceItem, SurfaceKind, SurfaceResponse, SurfaceStyle, TopPresenter,
};

/// Which overlay surface, if any, is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationState {
    #[default]
    Idle,
    ChoiceShown,
    ConfirmationShown,
}

/// Result of a trigger activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The choice surface was presented.
    Presented,
    /// Something was already presented; nothing happened.
    Ignored,
}

/// Callback invoked with the newly selected environment.
pub type SelectionCallback<E> = Box<dyn FnMut(E)>;

/// Drives the choice and confirmation surfaces.
pub struct SelectionPresenter<E: Environment> {
    catalog: EnvironmentCatalog<E>,
    store: SelectionStore,
    copy: SurfaceCopy,
    state: PresentationState,
    on_select: SelectionCallback<E>,
}

impl<E: Environment> SelectionPresenter<E> {
    /// Create an idle presenter.
    pub fn new(
        catalog: EnvironmentCatalog<E>,
        store: SelectionStore,
        copy: SurfaceCopy,
        on_select: SelectionCallback<E>,
    ) -> Self {
        Self {
            catalog,
            store,
            copy,
            state: PresentationState::Idle,
            on_select,
        }
    }

    #[must_use]
    pub fn state(&self) -> PresentationState {
        self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &EnvironmentCatalog<E> {
        &self.catalog
    }

    /// Handle a trigger activation.
    ///
    /// A host that closed the shown surface without answering it leaves the
    /// presenter out of date; the state is resynchronized to `Idle` first.
    pub fn activate(&mut self, top: &mut dyn TopPresenter) -> Activation {
        let host_busy = top.has_active_presentation();
        if self.state != PresentationState::Idle && !host_busy {
            tracing::debug!(state = ?self.state, "surface closed by host, presenter reset to idle");
            self.state = PresentationState::Idle;
        }
        if host_busy {
            tracing::debug!(state = ?self.state, "activation ignored, presentation active");
            return Activation::Ignored;
        }
        top.present(self.choice_surface());
        self.state = PresentationState::ChoiceShown;
        Activation::Presented
    }

    /// Handle the user's answer to the surface currently shown.
    ///
    /// Returns the newly selected environment when a choice was made.
    pub fn respond(&mut self, response: SurfaceResponse, top: &mut dyn TopPresenter) -> Option<E> {
        match (self.state, response) {
            (PresentationState::Idle, _) => {
                tracing::debug!(?response, "response while idle ignored");
                None
            }
            (_, SurfaceResponse::Dismissed) => {
                top.dismiss();
                self.state = PresentationState::Idle;
                None
            }
            (PresentationState::ChoiceShown, SurfaceResponse::Chose(index)) => {
                let Some(chosen) = self.catalog.get(index) else {
                    tracing::debug!(index, "choice outside catalog ignored");
                    return None;
                };
                self.select(chosen, top);
                Some(chosen)
            }
            (PresentationState::ConfirmationShown, SurfaceResponse::Chose(index)) => {
                tracing::debug!(index, "choice on confirmation ignored");
                None
            }
        }
    }

    fn select(&mut self, chosen: E, top: &mut dyn TopPresenter) {
        let identifier = chosen.identifier();
        if let Err(err) = self.store.set(identifier) {
            tracing::warn!(identifier, error = %err, "failed to persist environment selection");
        }
        (self.on_select)(chosen);

        top.dismiss();
        top.present(self.confirmation_surface(chosen));
        self.state = PresentationState::ConfirmationShown;
    }

    /// The choice list: one item per variant in catalog order, then dismiss.
    #[must_use]
    pub fn choice_surface(&self) -> Surface {
        let mut items: Vec<SurfaceItem> = self
            .catalog
            .iter()
            .enumerate()
            .map(|(index, env)| SurfaceItem::choice(env.display_label(), index))
            .collect();
        items.push(SurfaceItem::dismiss(&self.copy.dismiss_label));

        Surface {
            kind: SurfaceKind::Choice,
            style: SurfaceStyle::ActionSheet,
            title: SurfaceCopy::render(&self.copy.choice_title, &self.store.saved()),
            message: self.copy.choice_message.clone(),
            items,
        }
    }

    /// The restart notice for `chosen`.
    #[must_use]
    pub fn confirmation_surface(&self, chosen: E) -> Surface {
        Surface {
            kind: SurfaceKind::Confirmation,
            style: SurfaceStyle::Alert,
            title: self.copy.confirmation_title.clone(),
            message: SurfaceCopy::render(&self.copy.confirmation_message, chosen.identifier()),
            items: vec![SurfaceItem::dismiss(&self.copy.dismiss_label)],
        }
    }
}

impl<E: Environment> fmt::Debug for SelectionPresenter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionPresenter")
            .field("catalog", &self.catalog)
            .field("store", &self.store)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envswitch_core::store::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    envswitch_core::environments! {
        enum Env {
            A => "a",
            B => "b" as "Bee",
        }
    }

    #[derive(Default)]
    struct Stack {
        shown: Vec<Surface>,
        presented: usize,
    }

    impl TopPresenter for Stack {
        fn has_active_presentation(&self) -> bool {
            !self.shown.is_empty()
        }

        fn present(&mut self, surface: Surface) {
            self.presented += 1;
            self.shown.push(surface);
        }

        fn dismiss(&mut self) {
            self.shown.pop();
        }
    }

    fn presenter(selected: Rc<RefCell<Vec<Env>>>) -> (SelectionPresenter<Env>, SelectionStore) {
        let store = SelectionStore::new(Arc::new(MemoryStore::new()));
        store.set("a").unwrap();
        let p = SelectionPresenter::new(
            EnvironmentCatalog::new().unwrap(),
            store.clone(),
            SurfaceCopy::default(),
            Box::new(move |e: Env| selected.borrow_mut().push(e)),
        );
        (p, store)
    }

    #[test]
    fn activation_presents_choices_in_order() {
        let (mut p, _) = presenter(Rc::default());
        let mut top = Stack::default();
        assert_eq!(p.activate(&mut top), Activation::Presented);
        assert_eq!(p.state(), PresentationState::ChoiceShown);

        let sheet = &top.shown[0];
        assert_eq!(sheet.title, "Current env: a");
        assert_eq!(sheet.message, "Please select a backend environment");
        assert_eq!(sheet.labels().collect::<Vec<_>>(), ["a", "Bee", "Cancel"]);
    }

    #[test]
    fn choose_writes_store_then_confirms() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (mut p, store) = presenter(selected.clone());
        let mut top = Stack::default();
        p.activate(&mut top);

        assert_eq!(p.respond(SurfaceResponse::Chose(1), &mut top), Some(Env::B));
        assert_eq!(store.saved(), "b");
        assert_eq!(*selected.borrow(), vec![Env::B]);
        assert_eq!(p.state(), PresentationState::ConfirmationShown);
        assert_eq!(top.shown.len(), 1);
        assert_eq!(top.shown[0].kind, SurfaceKind::Confirmation);
        assert_eq!(top.shown[0].message, "Please restart the app to access b");
        assert_eq!(top.shown[0].labels().collect::<Vec<_>>(), ["Cancel"]);
    }

    #[test]
    fn activation_ignored_while_shown() {
        let (mut p, _) = presenter(Rc::default());
        let mut top = Stack::default();
        p.activate(&mut top);
        assert_eq!(p.activate(&mut top), Activation::Ignored);
        assert_eq!(top.presented, 1);

        p.respond(SurfaceResponse::Chose(0), &mut top);
        assert_eq!(p.activate(&mut top), Activation::Ignored);
        assert_eq!(p.state(), PresentationState::ConfirmationShown);
        assert_eq!(top.shown.len(), 1);
    }

    #[test]
    fn host_presentation_blocks_activation() {
        let (mut p, _) = presenter(Rc::default());
        let mut top = Stack::default();
        top.shown.push(Surface {
            kind: SurfaceKind::Host,
            style: SurfaceStyle::Alert,
            title: "host".into(),
            message: String::new(),
            items: vec![],
        });
        assert_eq!(p.activate(&mut top), Activation::Ignored);
        assert_eq!(p.state(), PresentationState::Idle);
    }

    #[test]
    fn dismiss_returns_to_idle_from_any_state() {
        let (mut p, _) = presenter(Rc::default());
        let mut top = Stack::default();
        p.activate(&mut top);
        p.respond(SurfaceResponse::Dismissed, &mut top);
        assert_eq!(p.state(), PresentationState::Idle);
        assert!(top.shown.is_empty());

        p.activate(&mut top);
        p.respond(SurfaceResponse::Chose(1), &mut top);
        p.respond(SurfaceResponse::Dismissed, &mut top);
        assert_eq!(p.state(), PresentationState::Idle);
        assert!(top.shown.is_empty());
    }

    #[test]
    fn host_closing_surface_unblocks_activation() {
        let (mut p, _) = presenter(Rc::default());
        let mut top = Stack::default();
        p.activate(&mut top);
        top.shown.pop();

        assert_eq!(p.activate(&mut top), Activation::Presented);
        assert_eq!(p.state(), PresentationState::ChoiceShown);
        assert_eq!(top.presented, 2);

        p.respond(SurfaceResponse::Chose(1), &mut top);
        top.shown.clear();
        assert_eq!(p.activate(&mut top), Activation::Presented);
        assert_eq!(top.shown[0].kind, SurfaceKind::Choice);
    }

    #[test]
    fn malformed_choice_is_ignored() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (mut p, store) = presenter(selected.clone());
        let mut top = Stack::default();
        p.activate(&mut top);
        assert_eq!(p.respond(SurfaceResponse::Chose(7), &mut top), None);
        assert_eq!(p.state(), PresentationState::ChoiceShown);
        assert!(selected.borrow().is_empty());
        assert_eq!(store.saved(), "a");
    }

    #[test]
    fn responses_while_idle_are_ignored() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (mut p, _) = presenter(selected.clone());
        let mut top = Stack::default();
        assert_eq!(p.respond(SurfaceResponse::Chose(0), &mut top), None);
        assert!(selected.borrow().is_empty());
        assert_eq!(p.state(), PresentationState::Idle);
    }
}
