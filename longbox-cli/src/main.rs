//! longbox CLI
//!
//! Command-line interface for reconciling comic library metadata so
//! reading-list imports match.

mod cli_types;
mod commands;
mod gate;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Database {
            db_path,
            backup,
            oneshots,
            remap,
            apply,
        } => {
            commands::database::run_database(db_path, backup, oneshots, remap, &apply);
        }
        Commands::Archives { dir, apply } => {
            commands::archives::run_archives(dir, &apply);
        }
        Commands::Remote { url, api_key, apply } => {
            commands::remote::run_remote(url, api_key, &apply);
        }
    }
}

/// Terminal-style logging: info-level prose by default, debug with
/// --verbose, warnings only with --quiet.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
