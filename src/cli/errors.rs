//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed to stderr and the process exits
//! non-zero.

use std::io;

use thiserror::Error;

use crate::observability::LogInitError;
use crate::store::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or flag error
    #[error("CITIES_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// I/O error (stdout, listener)
    #[error("CITIES_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding of a CLI response failed
    #[error("CITIES_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store could not be opened
    #[error("CITIES_CLI_BOOT_FAILED: {code}: {0}", code = .0.code())]
    Store(#[from] StoreError),

    /// Runtime or server failure during boot
    #[error("CITIES_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "CITIES_CLI_CONFIG_ERROR",
            Self::Io(_) | Self::Json(_) => "CITIES_CLI_IO_ERROR",
            Self::Store(_) | Self::BootFailed(_) => "CITIES_CLI_BOOT_FAILED",
        }
    }
}

impl From<LogInitError> for CliError {
    fn from(e: LogInitError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
