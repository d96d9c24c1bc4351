//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "longbox")]
#[command(about = "Reconcile comic library metadata for reading-list matching", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Common arguments for commands that apply corrections.
#[derive(Args, Clone)]
pub(crate) struct ApplyArgs {
    /// Apply every confirmed proposal without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would change without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Correct series titles in the library database
    Database {
        /// Path to the library database file
        db_path: PathBuf,

        /// Copy the database into this directory before changing anything
        #[arg(short, long)]
        backup: Option<PathBuf>,

        /// Also rewrite the embedded metadata of one-shot archives
        #[arg(short, long)]
        oneshots: bool,

        /// Rewrite recorded path prefixes: "old-prefix,new-prefix"
        #[arg(short, long)]
        remap: Option<String>,

        #[command(flatten)]
        apply: ApplyArgs,
    },

    /// Correct one-shot archives under a directory
    Archives {
        /// Directory containing one-shot cbz files
        dir: PathBuf,

        #[command(flatten)]
        apply: ApplyArgs,
    },

    /// Correct series titles through a running library server
    Remote {
        /// Base URL of the server API (e.g. http://nas:25600/api/v1)
        #[arg(long)]
        url: String,

        /// API key (defaults to the KOMGA_API_KEY environment variable)
        #[arg(long)]
        api_key: Option<String>,

        #[command(flatten)]
        apply: ApplyArgs,
    },
}
