//! Build CLI command.

use std::path::PathBuf;

use clap::Args;
use tileforge::build;
use tileforge::stream::BinaryReader;

use crate::error::CliError;

/// Arguments for the build subcommand.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Input entity stream (length-prefixed binary records, nodes first)
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory for the tile pyramid (must exist)
    #[arg(long)]
    pub output: PathBuf,

    /// Deepest zoom level to split down to
    #[arg(long, default_value = "14")]
    pub max_zoom: u8,
}

/// Run the build subcommand.
pub fn run(args: BuildArgs) -> Result<(), CliError> {
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        max_zoom = args.max_zoom,
        "Starting build"
    );

    let mut source = BinaryReader::open(&args.input).map_err(|e| CliError::InputOpen {
        path: args.input.clone(),
        message: e.to_string(),
    })?;

    let summary = build::build(&mut source, &args.output, args.max_zoom)
        .map_err(|e| CliError::Build(e.to_string()))?;

    println!("Build complete: {}", args.output.display());
    println!("  Levels below root: {}", summary.levels);
    println!("  Tiles processed:   {}", summary.tiles_processed);
    println!("  Nodes indexed:     {}", summary.nodes_indexed);
    println!("  Ways indexed:      {}", summary.ways_indexed);
    println!("  Relations indexed: {}", summary.relations_indexed);

    if summary.has_warnings() {
        println!("Warnings:");
        if summary.tiles_skipped > 0 {
            println!("  Tiles skipped (missing extract): {}", summary.tiles_skipped);
        }
        if summary.dangling_references > 0 {
            println!("  Dangling references dropped:     {}", summary.dangling_references);
        }
        if summary.malformed_coordinates > 0 {
            println!("  Malformed coordinates dropped:   {}", summary.malformed_coordinates);
        }
    }

    Ok(())
}
