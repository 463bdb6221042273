#![forbid(unsafe_code)]

//! Event loop tying the controller, the terminal presenter, and a host view
//! together.
//!
//! # Routing
//!
//! 1. While a surface is presented, input goes to the presenter. Its answer
//!    is forwarded to the controller (overlay surfaces) or the view (host
//!    surfaces).
//! 2. Otherwise pointer input goes to the controller. Presses it passes
//!    through reach the view as clicks.
//! 3. Keys with nothing presented go to the view; `q` quits.
//!
//! [`App::handle`] holds all routing logic and needs no terminal, so tests
//! drive it directly.

use std::io;
use std::time::Duration;

use envswitch_core::catalog::Environment;
use envswitch_core::geometry::{Point, Rect};
use envswitch_runtime::controller::{EnvironmentController, PointerDisposition};
use envswitch_widgets::surface::{SurfaceResponse, TopPresenter};

use crate::buffer::CellBuffer;
use crate::error::Result;
use crate::input::{self, Input, Key};
use crate::presenter::{Answer, TerminalPresenter};
use crate::render;
use crate::session::TerminalSession;

/// How long the loop waits for input before running the next UI cycle.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Whether the loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The host application's own content, drawn below the overlay.
pub trait HostView {
    /// Draw host content. The overlay and any surfaces are drawn on top.
    fn draw(&self, buf: &mut CellBuffer);

    /// A press the overlay passed through.
    fn on_click(&mut self, _at: Point, _top: &mut TerminalPresenter) {}

    /// A key pressed while nothing is presented.
    fn on_key(&mut self, _key: Key, _top: &mut TerminalPresenter) -> Flow {
        Flow::Continue
    }

    /// The user answered a surface this view presented.
    fn on_modal_answer(&mut self, _title: &str, _response: SurfaceResponse) {}
}

/// A terminal application with the environment switcher on top.
pub struct App<E: Environment, V: HostView> {
    controller: EnvironmentController<E, TerminalPresenter>,
    view: V,
    buffer: CellBuffer,
    dirty: bool,
}

impl<E: Environment, V: HostView> App<E, V> {
    /// Wrap `controller` and `view` for a `width` x `height` screen.
    pub fn new(
        mut controller: EnvironmentController<E, TerminalPresenter>,
        view: V,
        width: u16,
        height: u16,
    ) -> Self {
        controller.set_screen(screen_rect(width, height));
        controller.top_presenter_mut().set_screen(width, height);
        Self {
            controller,
            view,
            buffer: CellBuffer::new(width, height),
            dirty: true,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &EnvironmentController<E, TerminalPresenter> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut EnvironmentController<E, TerminalPresenter> {
        &mut self.controller
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Run one UI cycle of deferred controller work.
    pub fn tick(&mut self) -> usize {
        let ran = self.controller.tick();
        self.dirty |= ran > 0;
        ran
    }

    /// Route one input.
    pub fn handle(&mut self, input: Input) -> Flow {
        self.dirty = true;
        match input {
            Input::Interrupt => return Flow::Quit,
            Input::Resize { width, height } => {
                self.buffer.resize(width, height);
                self.controller.set_screen(screen_rect(width, height));
                self.controller.top_presenter_mut().set_screen(width, height);
                return Flow::Continue;
            }
            _ => {}
        }

        if self.controller.top_presenter().has_active_presentation() {
            let top = self.controller.top_presenter_mut();
            let answer = match input {
                Input::Key(key) => top.handle_key(key),
                Input::Pointer(event) => top.handle_pointer(event),
                Input::Hover(at) => {
                    top.handle_hover(at);
                    None
                }
                Input::Resize { .. } | Input::Interrupt => None,
            };
            match answer {
                Some(Answer::Overlay(response)) => {
                    self.controller.respond(response);
                }
                Some(Answer::Host { title, response }) => {
                    self.view.on_modal_answer(&title, response);
                }
                None => {}
            }
            return Flow::Continue;
        }

        match input {
            Input::Pointer(event) => {
                let disposition = self.controller.handle_pointer(event);
                if disposition == PointerDisposition::PassThrough && event.is_down() {
                    self.view
                        .on_click(event.position, self.controller.top_presenter_mut());
                }
                Flow::Continue
            }
            Input::Key(Key::Char('q')) => Flow::Quit,
            Input::Key(key) => self.view.on_key(key, self.controller.top_presenter_mut()),
            Input::Hover(_) | Input::Resize { .. } | Input::Interrupt => Flow::Continue,
        }
    }

    /// Compose the current frame.
    pub fn render(&mut self) -> &CellBuffer {
        self.buffer.clear();
        self.view.draw(&mut self.buffer);
        if let Some(trigger) = self.controller.trigger() {
            render::draw_trigger(&mut self.buffer, trigger);
        }
        self.controller.top_presenter().draw(&mut self.buffer);
        self.dirty = false;
        &self.buffer
    }

    /// Drive the app until the user quits.
    ///
    /// # Errors
    ///
    /// Returns any terminal I/O error.
    pub fn run(&mut self, session: &TerminalSession) -> Result<()> {
        let (width, height) = session.size()?;
        self.handle(Input::Resize { width, height });
        let mut stdout = io::stdout();

        loop {
            self.tick();
            if self.dirty {
                self.render().flush(&mut stdout)?;
            }
            if !session.poll_event(POLL_INTERVAL)? {
                continue;
            }
            if let Some(input) = input::map_event(session.read_event()?)
                && self.handle(input) == Flow::Quit
            {
                tracing::info!("quit requested");
                return Ok(());
            }
        }
    }
}

fn screen_rect(width: u16, height: u16) -> Rect {
    Rect::new(0.0, 0.0, f32::from(width), f32::from(height))
}
