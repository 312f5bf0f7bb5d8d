//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// nbsync notebook synchronizer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: nbsync.toml)
    #[arg(short = 'C', long, default_value = "nbsync.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Watch notebook files and reconcile in-memory mirrors on change
    #[command(visible_alias = "w")]
    Watch {
        /// Notebook files to watch
        #[arg(value_name = "PATH", required = true, value_hint = clap::ValueHint::FilePath)]
        paths: Vec<PathBuf>,

        /// Polling interval in milliseconds (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Parse a notebook file and print a per-cell summary
    #[command(visible_alias = "c")]
    Check {
        /// Notebook file to inspect
        #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,
    },
}
