//! Command-line surface.

use clap::{Parser, Subcommand};
use grocery_core::Filter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "grocery", version, about = "Grocery list backed by a local SQLite store")]
pub struct Cli {
    /// Database file; overrides GROCERY_DB_PATH.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error; overrides GROCERY_LOG_LEVEL.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for log files; overrides GROCERY_LOG_DIR.
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an item to the top of the list.
    Add { name: String, quantity: String },
    /// Print the list, newest first.
    List {
        #[arg(long, default_value = "all")]
        filter: Filter,
        /// Emit rows as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Flip the done flag of an item.
    Toggle { id: i64 },
    /// Delete an item.
    Delete { id: i64 },
    /// Interactive list screen with filter, add dialog and undo.
    Shell,
    /// Print the core version.
    Version,
}
