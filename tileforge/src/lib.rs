//! Tileforge - Zoom-level-partitioned tile pyramids from raw geographic data
//!
//! This library converts a raw stream of geographic entities (nodes, ways
//! built from nodes, relations built from nodes and ways) into a
//! disk-resident quadtree tile pyramid with per-entity-kind indices mapping
//! entity identity to the tile that owns it. It is the preprocessing stage
//! for systems that later serve or route over geographic data tile-by-tile.
//!
//! # High-Level API
//!
//! ```ignore
//! use tileforge::build::build;
//! use tileforge::stream::BinaryReader;
//!
//! let mut source = BinaryReader::open("planet.ent.bin")?;
//! let summary = build(&mut source, "./tiles", 14)?;
//!
//! if summary.has_warnings() {
//!     eprintln!("{} dangling references", summary.dangling_references);
//! }
//! ```

pub mod build;
pub mod entity;
pub mod index;
pub mod storage;
pub mod stream;
pub mod tile;

/// Version of the Tileforge library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
