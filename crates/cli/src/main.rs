//! agerotate CLI - age-based file rotation

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod util;

/// agerotate - Keep recent files densely, thin out older ones
#[derive(Parser)]
#[command(name = "agerotate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Field separator for config directives
    #[arg(long, global = true, default_value = fileobject::config::DEFAULT_FIELD_SEP)]
    field_sep: String,

    /// Log every keep/delete decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a rotation config, deleting files it does not keep
    Run {
        /// Path to the rotation config
        #[arg(short, long)]
        config: PathBuf,
        /// Log what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,
        /// Reference time for file ages, RFC 3339 (default: now)
        #[arg(long)]
        now: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a rotation config and show its schedule
    Check {
        /// Path to the rotation config
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Describe the config file format
    Format,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { config, dry_run, now, json } => {
            cmd::run::run(&config, &cli.field_sep, dry_run, now.as_deref(), json)
        }
        Commands::Check { config } => cmd::check::run(&config, &cli.field_sep),
        Commands::Format => cmd::format::run(&cli.field_sep),
    }
}

/// Logs go to stderr; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
