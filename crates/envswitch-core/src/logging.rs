#![forbid(unsafe_code)]

//! Logging support.
//!
//! Re-exports the tracing event macros when the `tracing` feature is enabled.
//! When the feature is disabled, no-op macros with the same names are exported
//! so call sites such as `crate::info!(...)` compile either way.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

// Note: the no-op macros are exported at crate root via #[macro_export],
// so they are not re-exported from here.
