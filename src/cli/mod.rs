//! Command-line interface for outfit-picker
//!
//! Provides `pick`, `quick`, `status`, `reset`, and `config` subcommands.
//! All user-facing text is rendered here; the library core only returns
//! data.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod pick;
mod quick;
mod reset;
mod settings;
mod status;
mod utils;

/// Cycle through outfit files in category folders without repeats
#[derive(Parser)]
#[command(name = "outfit-picker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a random outfit file
    Pick(pick::PickArgs),

    /// Pick and commit one outfit with no prompting
    Quick(quick::QuickArgs),

    /// Show per-category progress and the completion summary
    Status(status::StatusArgs),

    /// Clear remembered selections
    Reset(reset::ResetArgs),

    /// Show or change the saved configuration
    Config(settings::ConfigArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Pick(args) => pick::run(args),
        Commands::Quick(args) => quick::run(args),
        Commands::Status(args) => status::run(args),
        Commands::Reset(args) => reset::run(args),
        Commands::Config(args) => settings::run(args),
    }
}
