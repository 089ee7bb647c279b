//! Structured logger bootstrap
//!
//! - One log line = one event, tagged with an `event` field
//! - Text output for terminals, JSON for log shippers
//! - `RUST_LOG`, when set, overrides the configured level
//! - Initialization is idempotent and never panics

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

static LOGGING_STATE: Mutex<Option<(LogLevel, LogFormat)>> = Mutex::new(None);

/// Log severity threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogInitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(LogInitError::UnsupportedLevel(other.to_string())),
        }
    }
}

/// Output encoding for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = LogInitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(LogInitError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Logger setup failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogInitError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),

    #[error("unsupported log format `{0}`; expected text|json")]
    UnsupportedFormat(String),

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Installs the global tracing subscriber.
///
/// A second call, with any arguments, is a no-op once a subscriber from this
/// function is active.
///
/// # Errors
/// Returns [`LogInitError::Install`] when another global subscriber was set
/// outside this function.
pub fn init_logging(level: LogLevel, format: LogFormat) -> Result<(), LogInitError> {
    let mut state = LOGGING_STATE
        .lock()
        .map_err(|_| LogInitError::Install("logging state poisoned".to_string()))?;
    if state.is_some() {
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };
    installed.map_err(|err| LogInitError::Install(err.to_string()))?;

    *state = Some((level, format));
    Ok(())
}

/// Returns the active `(level, format)`, or `None` before initialization
#[cfg(test)]
fn logging_status() -> Option<(LogLevel, LogFormat)> {
    LOGGING_STATE.lock().ok().and_then(|state| *state)
}
