//! CLI module for the cities service
//!
//! Provides command-line interface for:
//! - init: Create the database file and schema
//! - start: Boot the store and serve HTTP until interrupted

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, CommonArgs};
pub use commands::{init, run, run_command, start};
pub use config::Config;
pub use errors::{CliError, CliResult};
