//! CLI argument definitions using clap
//!
//! Commands:
//! - cities init [--config <path>] [--database <path>]
//! - cities start [--config <path>] [--database <path>] [--port <port>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cities - a small CRUD service for city records
#[derive(Parser, Debug)]
#[command(name = "cities")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CommonArgs {
    /// Path to JSON configuration file (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(long)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and schema, then exit
    Init {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Start the HTTP server
    Start {
        #[command(flatten)]
        common: CommonArgs,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
