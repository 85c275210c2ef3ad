//! Command-line interface for tablediff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tablediff")]
#[command(about = "Prepare table descriptors for an upstream/downstream data comparison")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Strip hidden columns and their indexes from a descriptor file
    Normalize {
        /// JSON file holding an array of table descriptors
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Build the comparison plan from a task config and two schema snapshots
    Plan {
        /// Task config (TOML). TABLEDIFF_CONFIG takes precedence when set
        #[arg(long)]
        config: Option<PathBuf>,

        /// Upstream schema snapshot (JSON)
        #[arg(long)]
        upstream: PathBuf,

        /// Downstream schema snapshot (JSON)
        #[arg(long)]
        downstream: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the config fingerprint of every descriptor in a file
    Fingerprint {
        /// JSON file holding an array of table descriptors
        input: PathBuf,
    },
}
