//! CLI argument definitions for the Doable binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Doable list server
#[derive(Parser, Debug)]
#[command(name = "doable")]
#[command(about = "Doable: named, typed lists of ordered items")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Doable server
    Serve(ServeArgs),
    /// Check health of a running Doable server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 7000, env = "DOABLE_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "DOABLE_HOST")]
    pub host: String,

    /// Data directory for the JSON snapshot file (doable.json)
    #[arg(short = 'D', long, env = "DOABLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep surviving items' order values untouched after an item delete
    /// instead of renumbering them
    #[arg(long, env = "DOABLE_PRESERVE_GAPS")]
    pub preserve_gaps: bool,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Port of the server to check
    #[arg(short, long, default_value_t = 7000, env = "DOABLE_PORT")]
    pub port: u16,

    /// Host of the server to check
    #[arg(long, default_value = "127.0.0.1", env = "DOABLE_HOST")]
    pub host: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
