//! Tileforge CLI - Command-line interface
//!
//! This binary provides a command-line interface to the Tileforge library.

mod commands;
mod error;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tileforge")]
#[command(version = tileforge::VERSION)]
#[command(about = "Build zoom-level-partitioned tile pyramids from raw geographic entity data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tile pyramid from an entity stream
    Build(commands::build::BuildArgs),
    /// Inspect a tile index file
    Inspect(commands::inspect::InspectArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
