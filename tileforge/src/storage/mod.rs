//! On-disk layout of the tile pyramid.
//!
//! Every processed tile owns a triple of durable index files and up to three
//! transient extract files, all under `{root}/{zoom}/{x}/{y}.*`:
//!
//! - `{y}.nodes.idx` / `{y}.ways.idx` / `{y}.relations.idx`: durable
//!   per-kind indices for the tile.
//! - `{y}.nodes.osm.bin` / `{y}.ways.osm.bin` / `{y}.relations.osm.bin`:
//!   per-kind extracts holding exactly the entities assigned to the tile,
//!   consumed once by the next level's pass and then deleted.

mod error;

pub use error::StorageError;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::entity::{Entity, EntityKind};
use crate::stream::BinaryWriter;
use crate::tile::Tile;

/// Path scheme and extract bookkeeping for one output directory.
#[derive(Debug, Clone)]
pub struct TileStore {
    root: PathBuf,
}

impl TileStore {
    /// Creates a store rooted at an existing output directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory this store writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a tile's files: `{root}/{zoom}/{x}`.
    fn tile_dir(&self, tile: &Tile) -> PathBuf {
        self.root
            .join(tile.zoom.to_string())
            .join(tile.x.to_string())
    }

    /// Path of a tile's durable index for one entity kind.
    pub fn index_path(&self, tile: &Tile, kind: EntityKind) -> PathBuf {
        self.tile_dir(tile)
            .join(format!("{}.{}.idx", tile.y, kind.plural()))
    }

    /// Path of a tile's transient extract for one entity kind.
    pub fn extract_path(&self, tile: &Tile, kind: EntityKind) -> PathBuf {
        self.tile_dir(tile)
            .join(format!("{}.{}.osm.bin", tile.y, kind.plural()))
    }

    /// Deletes all extract files of a consumed tile.
    ///
    /// Extracts are read at most once; cleanup runs unconditionally after a
    /// tile's pass completes. Missing files are not an error.
    pub fn remove_extracts(&self, tile: &Tile) -> Result<(), StorageError> {
        for kind in [EntityKind::Node, EntityKind::Way, EntityKind::Relation] {
            let path = self.extract_path(tile, kind);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::RemoveFailed { path, source: e }),
            }
        }
        Ok(())
    }
}

/// Lazily-opened extract writers for one pass's child tiles.
///
/// A pass appends each entity record to the extract of the child tile it was
/// assigned to. Files are created on first write only, so a child with no
/// assignments gets no extract at all.
pub struct ExtractSet<'a> {
    store: &'a TileStore,
    kind: EntityKind,
    writers: BTreeMap<Tile, BinaryWriter<BufWriter<File>>>,
}

impl<'a> ExtractSet<'a> {
    /// Creates an empty extract set for one entity kind.
    pub fn new(store: &'a TileStore, kind: EntityKind) -> Self {
        Self {
            store,
            kind,
            writers: BTreeMap::new(),
        }
    }

    /// Appends an entity record to `tile`'s extract, creating it on first
    /// write.
    pub fn append(&mut self, tile: Tile, entity: &Entity) -> Result<(), StorageError> {
        let writer = match self.writers.entry(tile) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let dir = self.store.tile_dir(&tile);
                fs::create_dir_all(&dir).map_err(|e| StorageError::CreateDirFailed {
                    path: dir,
                    source: e,
                })?;

                let path = self.store.extract_path(&tile, self.kind);
                let writer = BinaryWriter::create(&path)
                    .map_err(|e| StorageError::ExtractWrite { path, source: e })?;
                entry.insert(writer)
            }
        };

        writer
            .write_entity(entity)
            .map_err(|e| StorageError::ExtractWrite {
                path: self.store.extract_path(&tile, self.kind),
                source: e,
            })
    }

    /// Flushes and closes all writers, returning the tiles that received at
    /// least one record in ascending `(zoom, x, y)` order.
    pub fn finish(self) -> Result<Vec<Tile>, StorageError> {
        let store = self.store;
        let kind = self.kind;
        let mut tiles = Vec::with_capacity(self.writers.len());

        for (tile, writer) in self.writers {
            writer.finish().map_err(|e| StorageError::ExtractWrite {
                path: store.extract_path(&tile, kind),
                source: e,
            })?;
            tiles.push(tile);
        }
        Ok(tiles)
    }
}
