//! CLI type definitions
//!
//! Clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nodeview")]
#[command(about = "Nodeview - route resolution and configuration for a node explorer")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Read the baseline configuration from this file instead of the bundled one
    #[arg(long, global = true, value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// Default log level, refined by RUST_LOG
    #[arg(long, global = true, env = "NODEVIEW_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the assembled configuration
    Config,

    /// Print the route a location maps to
    Route(LocationArgs),

    /// Map a location to a route and load it from the node daemons
    Resolve(LocationArgs),
}

#[derive(Args, Debug)]
pub struct LocationArgs {
    /// Location path, e.g. /nodes/seed.radicle.garden/rad:z3gq.../issues
    pub location: String,
}
