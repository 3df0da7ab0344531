//! Index inspection CLI command.

use std::path::PathBuf;

use clap::Args;
use tileforge::index::TileIndex;

use crate::error::CliError;

/// Arguments for the inspect subcommand.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Index file to inspect (`.idx`)
    pub index: PathBuf,

    /// Print every entry instead of just the summary
    #[arg(long)]
    pub entries: bool,
}

/// Run the inspect subcommand.
pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let index = TileIndex::read(&args.index).map_err(|e| CliError::IndexRead {
        path: args.index.clone(),
        message: e.to_string(),
    })?;

    println!("Index: {}", args.index.display());
    println!("  Entries: {}", index.len());

    if args.entries {
        for (id, tiles) in index.iter() {
            let tiles: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
            println!("  {} -> {}", id, tiles.join(", "));
        }
    }

    Ok(())
}
