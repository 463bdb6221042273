#![forbid(unsafe_code)]

//! Owning the terminal while the switcher host runs.
//!
//! [`TerminalSession`] records every mode it turns on in a stack and turns
//! them off again, newest first, when it is dropped. Raw mode sits at the
//! bottom of the stack, so the shell gets cooked input back last.
//!
//! A process-wide panic hook restores all modes unconditionally before the
//! panic message prints, so the message is readable and the shell usable.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::{cursor, event, execute, terminal};

/// Which terminal modes the host wants besides raw mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Draw on the alternate screen and leave the scrollback alone.
    pub alternate_screen: bool,
    /// Report clicks and drags; the trigger is unusable without it.
    pub mouse_capture: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Raw,
    AlternateScreen,
    MouseCapture,
    HiddenCursor,
}

impl Mode {
    fn enable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Mode::Raw => terminal::enable_raw_mode(),
            Mode::AlternateScreen => execute!(out, terminal::EnterAlternateScreen),
            Mode::MouseCapture => execute!(out, event::EnableMouseCapture),
            Mode::HiddenCursor => execute!(out, cursor::Hide),
        }
    }

    fn disable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Mode::Raw => terminal::disable_raw_mode(),
            Mode::AlternateScreen => execute!(out, terminal::LeaveAlternateScreen),
            Mode::MouseCapture => execute!(out, event::DisableMouseCapture),
            Mode::HiddenCursor => execute!(out, cursor::Show),
        }
    }
}

/// Modes to enable, in order. Raw mode always comes first.
fn modes_for(options: SessionOptions) -> Vec<Mode> {
    let mut modes = vec![Mode::Raw];
    if options.alternate_screen {
        modes.push(Mode::AlternateScreen);
    }
    if options.mouse_capture {
        modes.push(Mode::MouseCapture);
    }
    modes.push(Mode::HiddenCursor);
    modes
}

/// RAII guard over raw mode and the modes in [`SessionOptions`].
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    enabled: Vec<Mode>,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Fails if any mode cannot be enabled. Whatever was enabled before the
    /// failure is restored before returning.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        let wanted = modes_for(options);
        let mut session = Self {
            options,
            enabled: Vec::with_capacity(wanted.len()),
        };
        let mut stdout = io::stdout();
        for mode in wanted {
            mode.enable(&mut stdout)?;
            session.enabled.push(mode);
        }
        tracing::debug!(modes = ?session.enabled, "terminal session started");
        Ok(session)
    }

    /// Terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Returns `Ok(true)` if an event arrives within `timeout`.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Next raw event. Blocks until one is available.
    pub fn read_event(&self) -> io::Result<event::Event> {
        event::read()
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn restore(&mut self) {
        let mut stdout = io::stdout();
        while let Some(mode) = self.enabled.pop() {
            if let Err(err) = mode.disable(&mut stdout) {
                tracing::warn!(?mode, error = %err, "failed to restore terminal mode");
            }
        }
        let _ = stdout.flush();
        tracing::debug!("terminal session ended");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.restore();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            for mode in [
                Mode::HiddenCursor,
                Mode::MouseCapture,
                Mode::AlternateScreen,
                Mode::Raw,
            ] {
                let _ = mode.disable(&mut stdout);
            }
            let _ = stdout.flush();
            previous(info);
        }));
    });
}
