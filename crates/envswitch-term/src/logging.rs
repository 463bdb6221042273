#![forbid(unsafe_code)]

//! Log output for the terminal host.
//!
//! Stdout belongs to the TUI, so logs only go to a file. With no log file
//! configured nothing is installed and every event is dropped.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{LogFormat, TermConfig};
use crate::error::TermError;

/// Build a subscriber writing to `writer`.
///
/// # Errors
///
/// Returns [`TermError::Logging`] if `filter` is not a valid directive.
pub fn subscriber<W>(
    filter: &str,
    format: LogFormat,
    writer: W,
) -> Result<impl Subscriber + Send + Sync + 'static, TermError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| TermError::Logging(format!("invalid filter {filter:?}: {e}")))?;

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed(),
    };

    Ok(tracing_subscriber::registry().with(layer).with(filter))
}

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when no log file is configured.
///
/// # Errors
///
/// Fails if the log file cannot be opened, the filter is invalid, or a
/// global subscriber is already set.
pub fn init(config: &TermConfig) -> Result<bool, TermError> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let subscriber = subscriber(&config.log_filter, config.log_format, Mutex::new(file))?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| TermError::Logging(e.to_string()))?;

    tracing::info!(
        path = %path.display(),
        format = ?config.log_format,
        filter = %config.log_filter,
        "logging initialized"
    );
    Ok(true)
}
