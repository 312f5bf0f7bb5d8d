//! nbsync - keeps in-memory notebook documents in step with on-disk changes.

mod cli;
mod config;
mod host;
mod logger;
mod notebook;
mod reload;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli.config)?;

    match &cli.command {
        Commands::Watch { paths, interval } => cli::watch::run(paths, *interval, &config),
        Commands::Check { path } => cli::check::run(path),
    }
}
