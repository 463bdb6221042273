#![forbid(unsafe_code)]

//! Translation of crossterm events into host input.
//!
//! Mouse coordinates are cell indices. They are mapped to the center of the
//! cell, so a cell is hit exactly when its center lies inside a frame.

use crossterm::event::{
    Event as CtEvent, KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent as CtMouseEvent, MouseEventKind,
};
use envswitch_core::event::PointerEvent;
use envswitch_core::geometry::Point;

/// Keys the host reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    Char(char),
}

/// One unit of host input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Primary-button press, drag, or release.
    Pointer(PointerEvent),
    /// Pointer moved with no button held.
    Hover(Point),
    Key(Key),
    Resize { width: u16, height: u16 },
    /// Ctrl+C.
    Interrupt,
}

/// Center of the cell at (`column`, `row`).
#[must_use]
pub fn cell_center(column: u16, row: u16) -> Point {
    Point::new(f32::from(column) + 0.5, f32::from(row) + 0.5)
}

/// Map a crossterm event. Returns `None` for events the host ignores.
#[must_use]
pub fn map_event(event: CtEvent) -> Option<Input> {
    match event {
        CtEvent::Key(key) => map_key_event(key),
        CtEvent::Mouse(mouse) => map_mouse_event(mouse),
        CtEvent::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    }
}

fn map_key_event(event: CtKeyEvent) -> Option<Input> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match event.code {
        CtKeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Input::Interrupt);
        }
        CtKeyCode::Up => Key::Up,
        CtKeyCode::Down => Key::Down,
        CtKeyCode::Tab => Key::Down,
        CtKeyCode::BackTab => Key::Up,
        CtKeyCode::Enter => Key::Enter,
        CtKeyCode::Esc => Key::Escape,
        CtKeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(Input::Key(key))
}

fn map_mouse_event(event: CtMouseEvent) -> Option<Input> {
    let at = cell_center(event.column, event.row);
    let pointer = match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerEvent::down(at.x, at.y),
        MouseEventKind::Drag(MouseButton::Left) => PointerEvent::moved(at.x, at.y),
        MouseEventKind::Up(MouseButton::Left) => PointerEvent::up(at.x, at.y),
        MouseEventKind::Moved => return Some(Input::Hover(at)),
        _ => return None,
    };
    Some(Input::Pointer(pointer))
}
