//! CLI command implementations
//!
//! Startup is strictly sequential: configuration, logging, store, listener.
//! The first failure aborts the command.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::http_server::HttpServer;
use crate::observability::{init_logging, Event};
use crate::store::{CityStore, SqliteCityStore};

use super::args::{Command, CommonArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { common } => init(&common),
        Command::Start { common, port } => start(&common, port),
    }
}

/// Create the database file and schema, then exit
///
/// Idempotent: running it against an existing database leaves rows intact.
pub fn init(common: &CommonArgs) -> CliResult<()> {
    let config = load_config(common, None)?;
    init_logging(config.log_level, config.log_format)?;

    let store = open_store(&config.database_path)?;
    let cities = store.count()?;

    write_response(json!({
        "initialized": true,
        "database": config.database_path.display().to_string(),
        "cities": cities,
    }))
}

/// Start the HTTP server and serve until Ctrl-C
pub fn start(common: &CommonArgs, port: Option<u16>) -> CliResult<()> {
    let config = load_config(common, port)?;
    init_logging(config.log_level, config.log_format)?;

    tracing::info!(
        event = Event::BootStart.as_str(),
        version = env!("CARGO_PKG_VERSION"),
    );

    let result = serve(&config);
    if let Err(err) = &result {
        tracing::error!(code = err.code_str(), error = %err, "startup failed");
    }
    result
}

fn serve(config: &Config) -> CliResult<()> {
    let store = Arc::new(open_store(&config.database_path)?);
    let server = HttpServer::new(config.http.clone(), store);

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Resolve the configuration file and apply flag overrides
fn load_config(common: &CommonArgs, port: Option<u16>) -> CliResult<Config> {
    let config = Config::resolve(common.config.as_deref())?
        .with_overrides(common.database.clone(), port)?;

    tracing::debug!(
        event = Event::ConfigLoaded.as_str(),
        database = %config.database_path.display(),
        port = config.http.port,
    );
    Ok(config)
}

fn open_store(path: &Path) -> CliResult<SqliteCityStore> {
    SqliteCityStore::open(path).map_err(|e| {
        CliError::boot_failed(format!(
            "Failed to open database {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_database() {
        let dir = TempDir::new().unwrap();
        let database = dir.path().join("cities.db");
        let common = CommonArgs {
            config: None,
            database: Some(database.clone()),
        };

        init(&common).unwrap();
        assert!(database.exists());

        // Second run keeps the existing file usable
        init(&common).unwrap();
        let store = SqliteCityStore::open(&database).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_init_with_unreadable_config_fails() {
        let common = CommonArgs {
            config: Some(PathBuf::from("/nonexistent/cities.json")),
            database: None,
        };
        let err = init(&common).unwrap_err();
        assert_eq!(err.code_str(), "CITIES_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_open_store_in_missing_directory_is_boot_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("cities.db");
        let err = open_store(&path).unwrap_err();
        assert_eq!(err.code_str(), "CITIES_CLI_BOOT_FAILED");
    }
}
