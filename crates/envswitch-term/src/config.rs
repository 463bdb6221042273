#![forbid(unsafe_code)]

//! Host configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `ENVSWITCH_STATE_FILE` | JSON key-value file | `$XDG_STATE_HOME/envswitch/<app>/state.json` |
//! | `ENVSWITCH_TRIGGER_LABEL` | Trigger label | `EN` |
//! | `ENVSWITCH_TRIGGER_IMAGE` | Named trigger image (wins over the label) | unset |
//! | `ENVSWITCH_LOG_FILE` | Log destination | unset (logging off) |
//! | `ENVSWITCH_LOG_FORMAT` | `text` or `json` | `text` |
//! | `ENVSWITCH_LOG` | Filter directive | `info` |
//!
//! Parsing goes through a lookup closure so it can be tested without
//! touching the process environment. Empty values count as unset.

use std::env;
use std::path::PathBuf;

use envswitch_core::store::FileStore;
use envswitch_runtime::controller::ControllerConfig;

use crate::error::ConfigError;

pub const STATE_FILE_VAR: &str = "ENVSWITCH_STATE_FILE";
pub const TRIGGER_LABEL_VAR: &str = "ENVSWITCH_TRIGGER_LABEL";
pub const TRIGGER_IMAGE_VAR: &str = "ENVSWITCH_TRIGGER_IMAGE";
pub const LOG_FILE_VAR: &str = "ENVSWITCH_LOG_FILE";
pub const LOG_FORMAT_VAR: &str = "ENVSWITCH_LOG_FORMAT";
pub const LOG_FILTER_VAR: &str = "ENVSWITCH_LOG";

/// Default filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse `text` or `json`, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("text") {
            Some(Self::Text)
        } else if s.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Terminal host configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TermConfig {
    pub state_file: PathBuf,
    pub trigger_label: Option<String>,
    pub trigger_image: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl TermConfig {
    /// Read configuration from the process environment.
    pub fn from_env(app_name: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(app_name, |key| env::var(key).ok())
    }

    /// Read configuration through `lookup`.
    pub fn from_lookup(
        app_name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(value) => LogFormat::parse(value.trim()).ok_or(ConfigError {
                variable: LOG_FORMAT_VAR,
                value,
                expected: "text or json",
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            state_file: get(STATE_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| FileStore::default_path_for_app(app_name)),
            trigger_label: get(TRIGGER_LABEL_VAR),
            trigger_image: get(TRIGGER_IMAGE_VAR),
            log_file: get(LOG_FILE_VAR).map(PathBuf::from),
            log_format,
            log_filter: get(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Apply the trigger overrides to `base`.
    #[must_use]
    pub fn controller_config(&self, base: ControllerConfig) -> ControllerConfig {
        match (&self.trigger_image, &self.trigger_label) {
            (Some(image), _) => base.with_named_image(image.clone()),
            (None, Some(label)) => base.with_label(label.clone()),
            (None, None) => base,
        }
    }
}
