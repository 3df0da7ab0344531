//! Recursive tile-partitioning build pipeline.
//!
//! The builder drives one long-lived recursion over the quadtree: an
//! initial pass over the full input stream at the root tile, then level by
//! level, re-running Node → Way → Relation processing against each pending
//! tile's materialized extract files until a level produces no new
//! non-empty tiles.
//!
//! Within a pass the order is strict: nodes must be tiled before ways,
//! ways before relations, because way and relation assignment resolve
//! against the indices produced earlier in the same pass. Levels are just
//! as strict. A level's full non-empty-tile set is known and durable
//! before any tile of the next level is touched, since the next level's
//! inputs are exactly the previous level's extract files.

mod error;
mod node;
mod observer;
mod relation;
mod summary;
mod way;

pub use error::{BuildError, BuildResult};
pub use node::NodePass;
pub use observer::{BuildObserver, NoopObserver, TracingObserver};
pub use relation::RelationPass;
pub use summary::BuildSummary;
pub use way::WayPass;

use std::path::Path;

use crate::entity::EntityKind;
use crate::storage::TileStore;
use crate::stream::{EntitySource, ExtractReader};
use crate::tile::{Tile, MAX_ZOOM};

/// Builds a tile pyramid from `source` into `output_dir`, splitting down to
/// `max_zoom`.
///
/// Convenience over [`Builder`] with the default tracing observer.
///
/// # Errors
///
/// Fails fast with [`BuildError::InvalidArgument`] if the source cannot be
/// reset, the output directory does not exist, or `max_zoom` is out of
/// range; any fatal stream or I/O failure aborts the whole build.
pub fn build<S: EntitySource>(
    source: &mut S,
    output_dir: impl AsRef<Path>,
    max_zoom: u8,
) -> BuildResult<BuildSummary> {
    Builder::new(output_dir, max_zoom).run(source)
}

/// Orchestrates the level-by-level build recursion.
pub struct Builder {
    store: TileStore,
    max_zoom: u8,
    observer: Box<dyn BuildObserver>,
}

impl Builder {
    /// Creates a builder writing under `output_dir`, splitting down to
    /// `max_zoom`, reporting progress through the default tracing observer.
    pub fn new(output_dir: impl AsRef<Path>, max_zoom: u8) -> Self {
        Self {
            store: TileStore::new(output_dir.as_ref()),
            max_zoom,
            observer: Box::new(TracingObserver),
        }
    }

    /// Replaces the progress observer.
    pub fn with_observer(mut self, observer: Box<dyn BuildObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Runs the full build.
    ///
    /// The root pass makes one logical pass per entity kind over `source`,
    /// resetting it in between; level passes read per-tile extracts. The
    /// recursion terminates when a level yields no non-empty children,
    /// which is guaranteed within `max_zoom` levels.
    pub fn run<S: EntitySource>(&mut self, source: &mut S) -> BuildResult<BuildSummary> {
        if !source.can_reset() {
            return Err(BuildError::InvalidArgument(
                "entity source must support reset".to_string(),
            ));
        }
        if !self.store.root().is_dir() {
            return Err(BuildError::InvalidArgument(format!(
                "output directory {} does not exist",
                self.store.root().display()
            )));
        }
        if self.max_zoom == 0 || self.max_zoom > MAX_ZOOM {
            return Err(BuildError::InvalidArgument(format!(
                "max zoom {} outside supported range 1..={}",
                self.max_zoom, MAX_ZOOM
            )));
        }

        let mut summary = BuildSummary::new();
        let mut pending = self.build_root(source, &mut summary)?;

        while !pending.is_empty() {
            summary.levels += 1;
            let mut next = Vec::new();
            for tile in pending {
                next.extend(self.build_tile(tile, &mut summary)?);
            }
            pending = next;
        }

        tracing::info!(
            levels = summary.levels,
            tiles = summary.tiles_processed,
            nodes = summary.nodes_indexed,
            ways = summary.ways_indexed,
            relations = summary.relations_indexed,
            "Build complete"
        );
        if summary.has_warnings() {
            tracing::warn!(
                skipped_tiles = summary.tiles_skipped,
                dangling_references = summary.dangling_references,
                malformed_coordinates = summary.malformed_coordinates,
                "Build finished with warnings"
            );
        }

        Ok(summary)
    }

    /// Initial pass over the full input stream at the root tile.
    fn build_root<S: EntitySource>(
        &mut self,
        source: &mut S,
        summary: &mut BuildSummary,
    ) -> BuildResult<Vec<Tile>> {
        let tile = Tile::ROOT;
        self.observer.tile_started(&tile);

        match self.root_passes(source, summary) {
            Ok(pending) => Ok(pending),
            Err(e) => {
                self.observer.tile_failed(&tile, &e);
                Err(e)
            }
        }
    }

    fn root_passes<S: EntitySource>(
        &mut self,
        source: &mut S,
        summary: &mut BuildSummary,
    ) -> BuildResult<Vec<Tile>> {
        let tile = Tile::ROOT;

        let node_pass = node::process(source, &self.store, self.max_zoom, tile)?;

        let way_pass = if node_pass.has_more_levels {
            source.reset()?;
            Some(way::process(source, &self.store, &node_pass.index)?)
        } else {
            None
        };

        source.reset()?;
        let relation_pass = relation::process(
            source,
            &self.store,
            &node_pass.index,
            way_pass.as_ref().map(|p| &p.index),
        )?;

        node_pass
            .index
            .write(self.store.index_path(&tile, EntityKind::Node))?;
        if let Some(pass) = &way_pass {
            pass.index
                .write(self.store.index_path(&tile, EntityKind::Way))?;
        }
        relation_pass
            .index
            .write(self.store.index_path(&tile, EntityKind::Relation))?;

        record(summary, &node_pass, way_pass.as_ref(), Some(&relation_pass));

        if node_pass.has_more_levels {
            Ok(node_pass.non_empty)
        } else {
            Ok(Vec::new())
        }
    }

    /// Level pass for one pending tile, reading its extract files.
    fn build_tile(&mut self, tile: Tile, summary: &mut BuildSummary) -> BuildResult<Vec<Tile>> {
        self.observer.tile_started(&tile);

        if !self.store.extract_path(&tile, EntityKind::Node).exists() {
            // Legitimate after an interrupted earlier run; the tile is
            // treated as empty and contributes no further children.
            self.observer.tile_skipped(&tile, "node extract missing");
            summary.tiles_skipped += 1;
            return Ok(Vec::new());
        }

        match self.level_passes(tile, summary) {
            Ok(pending) => Ok(pending),
            Err(e) => {
                self.observer.tile_failed(&tile, &e);
                Err(e)
            }
        }
    }

    fn level_passes(&mut self, tile: Tile, summary: &mut BuildSummary) -> BuildResult<Vec<Tile>> {
        let node_pass = {
            let mut source =
                ExtractReader::open(self.store.extract_path(&tile, EntityKind::Node))?;
            node::process(&mut source, &self.store, self.max_zoom, tile)?
        };

        let way_extract = self.store.extract_path(&tile, EntityKind::Way);
        let way_pass = if way_extract.exists() {
            let mut source = ExtractReader::open(&way_extract)?;
            Some(way::process(&mut source, &self.store, &node_pass.index)?)
        } else {
            None
        };

        let relation_extract = self.store.extract_path(&tile, EntityKind::Relation);
        let relation_pass = if relation_extract.exists() {
            let mut source = ExtractReader::open(&relation_extract)?;
            Some(relation::process(
                &mut source,
                &self.store,
                &node_pass.index,
                way_pass.as_ref().map(|p| &p.index),
            )?)
        } else {
            None
        };

        node_pass
            .index
            .write(self.store.index_path(&tile, EntityKind::Node))?;
        if let Some(pass) = &way_pass {
            pass.index
                .write(self.store.index_path(&tile, EntityKind::Way))?;
        }
        if let Some(pass) = &relation_pass {
            pass.index
                .write(self.store.index_path(&tile, EntityKind::Relation))?;
        }

        // An extract is never read twice.
        self.store.remove_extracts(&tile)?;

        record(
            summary,
            &node_pass,
            way_pass.as_ref(),
            relation_pass.as_ref(),
        );

        if node_pass.has_more_levels {
            Ok(node_pass.non_empty)
        } else {
            Ok(Vec::new())
        }
    }
}

fn record(
    summary: &mut BuildSummary,
    node: &NodePass,
    way: Option<&WayPass>,
    relation: Option<&RelationPass>,
) {
    summary.tiles_processed += 1;
    summary.nodes_indexed += node.index.len() as u64;
    summary.malformed_coordinates += node.malformed;
    if let Some(pass) = way {
        summary.ways_indexed += pass.index.len() as u64;
        summary.dangling_references += pass.dangling;
    }
    if let Some(pass) = relation {
        summary.relations_indexed += pass.index.len() as u64;
        summary.dangling_references += pass.dangling;
    }
}
