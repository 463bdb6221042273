#![forbid(unsafe_code)]

//! Crossterm host for the environment switcher overlay.
//!
//! Runs a [`HostView`](app::HostView) in the alternate screen with the
//! switcher's trigger floating above it, and presents the switcher's
//! surfaces as terminal modals.

pub mod app;
pub mod buffer;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod render;
pub mod session;

pub use app::{App, Flow, HostView};
pub use buffer::{Cell, CellBuffer, CellRect, CellStyle};
pub use config::{LogFormat, TermConfig};
pub use error::{ConfigError, Result, TermError};
pub use input::{Input, Key};
pub use presenter::{Answer, TerminalPresenter};
pub use session::{SessionOptions, TerminalSession};
