//! Service configuration
//!
//! Loaded from an optional JSON file; every field has a default. Command-line
//! flags are applied on top with [`Config::with_overrides`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::{LogFormat, LogLevel};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default: "cities.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Log threshold (default: info)
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log line encoding (default: text)
    #[serde(default)]
    pub log_format: LogFormat,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("cities.db")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides and re-validate
    pub fn with_overrides(mut self, database: Option<PathBuf>, port: Option<u16>) -> CliResult<Self> {
        if let Some(database) = database {
            self.database_path = database;
        }
        if let Some(port) = port {
            self.http.port = port;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if self.http.request_timeout_ms == 0 {
            return Err(CliError::config_error("http.request_timeout_ms must be > 0"));
        }

        Ok(())
    }
}
