#![forbid(unsafe_code)]

//! Errors surfaced by the terminal host.

use std::fmt;
use std::io;

use envswitch_core::store::StorageError;
use envswitch_runtime::controller::ControllerError;

/// A configuration variable held an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={:?} is invalid (expected {})",
            self.variable, self.value, self.expected
        )
    }
}

impl std::error::Error for ConfigError {}

/// Top-level error type for the terminal host.
#[derive(Debug)]
pub enum TermError {
    /// I/O failure during terminal operations.
    Io(io::Error),
    /// Bad environment configuration.
    Config(ConfigError),
    /// The state file could not be opened.
    Storage(StorageError),
    /// The controller rejected its configuration.
    Controller(ControllerError),
    /// Log output could not be set up.
    Logging(String),
}

impl fmt::Display for TermError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal I/O error: {err}"),
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Storage(err) => write!(f, "state file error: {err}"),
            Self::Controller(err) => write!(f, "{err}"),
            Self::Logging(msg) => write!(f, "logging setup failed: {msg}"),
        }
    }
}

impl std::error::Error for TermError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Controller(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<io::Error> for TermError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for TermError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<StorageError> for TermError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<ControllerError> for TermError {
    fn from(err: ControllerError) -> Self {
        Self::Controller(err)
    }
}

/// Standard result type for the terminal host.
pub type Result<T> = std::result::Result<T, TermError>;
