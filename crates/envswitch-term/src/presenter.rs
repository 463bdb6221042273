#![forbid(unsafe_code)]

//! The terminal's topmost presenter.
//!
//! Holds a stack of modal surfaces. Both the overlay and the host view
//! present through it, so one presentation check covers everything on
//! screen.
//!
//! # Input
//!
//! While anything is presented, the top surface takes all input:
//!
//! | Input | Effect |
//! |-------|--------|
//! | Up / Down, hover | Move the highlight |
//! | Enter, click on item | Answer with that item |
//! | Esc | Dismiss |
//! | Click outside a choice surface | Dismiss |
//! | Click outside any other surface | Nothing |
//!
//! Answers to the overlay's surfaces are returned for the controller, which
//! then calls [`TopPresenter::dismiss`]. Host surfaces are removed here and
//! their answer handed back to the host.

use envswitch_core::event::{PointerEvent, PointerPhase};
use envswitch_core::geometry::Point;
use envswitch_widgets::surface::{Surface, SurfaceKind, SurfaceResponse, TopPresenter};

use crate::buffer::CellBuffer;
use crate::input::Key;
use crate::render::{self, SurfaceLayout};

/// Who an answer belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Answer to the overlay's choice or confirmation surface.
    Overlay(SurfaceResponse),
    /// Answer to a surface the host presented; the surface is already gone.
    Host { title: String, response: SurfaceResponse },
}

#[derive(Debug, Clone)]
struct Shown {
    surface: Surface,
    highlight: usize,
}

/// Modal stack drawn above host content and the overlay.
#[derive(Debug, Clone)]
pub struct TerminalPresenter {
    stack: Vec<Shown>,
    width: u16,
    height: u16,
}

impl TerminalPresenter {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            stack: Vec::new(),
            width,
            height,
        }
    }

    /// Follow a terminal resize.
    pub fn set_screen(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// The surface on top, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Surface> {
        self.stack.last().map(|s| &s.surface)
    }

    /// Highlighted item of the top surface.
    #[must_use]
    pub fn highlight(&self) -> Option<usize> {
        self.stack.last().map(|s| s.highlight)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Layout of the top surface on the current screen.
    #[must_use]
    pub fn layout(&self) -> Option<SurfaceLayout> {
        self.current()
            .map(|s| render::layout_surface(s, self.width, self.height))
    }

    /// Route a key to the top surface.
    pub fn handle_key(&mut self, key: Key) -> Option<Answer> {
        let shown = self.stack.last_mut()?;
        let count = shown.surface.items.len();
        match key {
            Key::Up if count > 0 => {
                shown.highlight = (shown.highlight + count - 1) % count;
                None
            }
            Key::Down if count > 0 => {
                shown.highlight = (shown.highlight + 1) % count;
                None
            }
            Key::Enter => {
                let response = shown.surface.items.get(shown.highlight)?.response();
                Some(self.answer(response))
            }
            Key::Escape => Some(self.answer(SurfaceResponse::Dismissed)),
            _ => None,
        }
    }

    /// Move the highlight to the item under the pointer.
    pub fn handle_hover(&mut self, at: Point) {
        let Some(layout) = self.layout() else {
            return;
        };
        if let Some(index) = layout.item_at(at.x as u16, at.y as u16)
            && let Some(shown) = self.stack.last_mut()
        {
            shown.highlight = index;
        }
    }

    /// Route a pointer event to the top surface. Only presses act.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Answer> {
        if event.phase != PointerPhase::Down {
            return None;
        }
        let layout = self.layout()?;
        let (x, y) = (event.position.x as u16, event.position.y as u16);
        if let Some(index) = layout.item_at(x, y) {
            let response = self.current()?.items[index].response();
            return Some(self.answer(response));
        }
        let outside = !layout.frame.contains(x, y);
        if outside && self.current()?.kind == SurfaceKind::Choice {
            return Some(self.answer(SurfaceResponse::Dismissed));
        }
        None
    }

    fn answer(&mut self, response: SurfaceResponse) -> Answer {
        match self.stack.last() {
            Some(shown) if shown.surface.kind == SurfaceKind::Host => {
                let title = shown.surface.title.clone();
                self.stack.pop();
                tracing::debug!(title = %title, ?response, "host surface answered");
                Answer::Host { title, response }
            }
            _ => Answer::Overlay(response),
        }
    }

    /// Draw every presented surface, bottom of the stack first.
    pub fn draw(&self, buf: &mut CellBuffer) {
        let top = self.stack.len().saturating_sub(1);
        for (index, shown) in self.stack.iter().enumerate() {
            let layout = render::layout_surface(&shown.surface, self.width, self.height);
            let highlight = (index == top).then_some(shown.highlight);
            render::draw_surface(buf, &shown.surface, &layout, highlight);
        }
    }
}

impl TopPresenter for TerminalPresenter {
    fn has_active_presentation(&self) -> bool {
        !self.stack.is_empty()
    }

    fn present(&mut self, surface: Surface) {
        tracing::debug!(kind = ?surface.kind, title = %surface.title, "surface presented");
        self.stack.push(Shown {
            surface,
            highlight: 0,
        });
    }

    fn dismiss(&mut self) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envswitch_widgets::surface::{SurfaceItem, SurfaceStyle};

    fn choice() -> Surface {
        Surface {
            kind: SurfaceKind::Choice,
            style: SurfaceStyle::ActionSheet,
            title: "Current env: a".into(),
            message: String::new(),
            items: vec![
                SurfaceItem::choice("a", 0),
                SurfaceItem::choice("b", 1),
                SurfaceItem::dismiss("Cancel"),
            ],
        }
    }

    fn host_alert() -> Surface {
        Surface {
            kind: SurfaceKind::Host,
            style: SurfaceStyle::Alert,
            title: "Settings".into(),
            message: String::new(),
            items: vec![SurfaceItem::dismiss("Close")],
        }
    }

    fn click(x: u16, y: u16) -> PointerEvent {
        PointerEvent::down(f32::from(x) + 0.5, f32::from(y) + 0.5)
    }

    #[test]
    fn keyboard_navigation_wraps() {
        let mut p = TerminalPresenter::new(80, 24);
        p.present(choice());
        assert_eq!(p.handle_key(Key::Up), None);
        assert_eq!(p.highlight(), Some(2));
        p.handle_key(Key::Down);
        p.handle_key(Key::Down);
        assert_eq!(
            p.handle_key(Key::Enter),
            Some(Answer::Overlay(SurfaceResponse::Chose(1)))
        );
        assert_eq!(p.depth(), 1);
    }

    #[test]
    fn click_on_item_answers() {
        let mut p = TerminalPresenter::new(80, 24);
        p.present(choice());
        let row = p.layout().unwrap().items[2];
        assert_eq!(
            p.handle_pointer(click(row.x + 2, row.y)),
            Some(Answer::Overlay(SurfaceResponse::Dismissed))
        );
    }

    #[test]
    fn outside_click_dismisses_choice_only() {
        let mut p = TerminalPresenter::new(80, 24);
        p.present(choice());
        assert_eq!(
            p.handle_pointer(click(0, 0)),
            Some(Answer::Overlay(SurfaceResponse::Dismissed))
        );

        p.dismiss();
        let mut confirmation = choice();
        confirmation.kind = SurfaceKind::Confirmation;
        p.present(confirmation);
        assert_eq!(p.handle_pointer(click(0, 0)), None);
    }

    #[test]
    fn host_surfaces_answer_the_host() {
        let mut p = TerminalPresenter::new(80, 24);
        p.present(host_alert());
        assert!(p.has_active_presentation());
        assert_eq!(
            p.handle_key(Key::Escape),
            Some(Answer::Host {
                title: "Settings".into(),
                response: SurfaceResponse::Dismissed
            })
        );
        assert!(!p.has_active_presentation());
    }

    #[test]
    fn hover_moves_highlight() {
        let mut p = TerminalPresenter::new(80, 24);
        p.present(choice());
        let row = p.layout().unwrap().items[1];
        p.handle_hover(Point::new(f32::from(row.x) + 1.5, f32::from(row.y) + 0.5));
        assert_eq!(p.highlight(), Some(1));
    }

    #[test]
    fn input_without_surface_is_ignored() {
        let mut p = TerminalPresenter::new(80, 24);
        assert_eq!(p.handle_key(Key::Enter), None);
        assert_eq!(p.handle_pointer(click(1, 1)), None);
    }
}
