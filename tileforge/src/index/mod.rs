//! Per-tile entity indices.
//!
//! A [`TileIndex`] maps entity identifiers (within one kind's namespace) to
//! the child tile(s) that own them at one build level. An index is built
//! completely in memory during a single pass, serialized once, and never
//! mutated afterward.
//!
//! Node indices map each id to exactly one tile; way and relation indices
//! may map an id to several tiles when the entity crosses a tile boundary
//! and is duplicated into each touched tile.

mod error;

pub use error::IndexError;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tile::Tile;

/// Write-once mapping from entity identifier to owning tile(s).
///
/// Backed by a `BTreeMap` with sorted, deduplicated tile lists so that
/// serialization is deterministic: two builds over the same input produce
/// bit-for-bit identical index files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileIndex {
    entries: BTreeMap<i64, Vec<Tile>>,
}

impl TileIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `id` was assigned to `tile`.
    ///
    /// Duplicate assignments of the same `(id, tile)` pair are ignored; an
    /// id assigned to several distinct tiles keeps them in sorted order.
    pub fn insert(&mut self, id: i64, tile: Tile) {
        let tiles = self.entries.entry(id).or_default();
        if let Err(pos) = tiles.binary_search(&tile) {
            tiles.insert(pos, tile);
        }
    }

    /// Returns the tiles owning `id`, empty when the id is unknown.
    pub fn get(&self, id: i64) -> &[Tile] {
        self.entries.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `id` has at least one assignment.
    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of distinct identifiers in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no identifier has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, tiles)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[Tile])> {
        self.entries.iter().map(|(id, tiles)| (*id, tiles.as_slice()))
    }

    /// Persists the index to `path`.
    ///
    /// The index is written to a sibling temporary file and renamed into
    /// place, so no partial index is ever visible at its final path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the temporary
    /// file cannot be written, or the rename fails.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), IndexError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| IndexError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file_name = path
            .file_name()
            .ok_or_else(|| IndexError::InvalidPath(path.to_path_buf()))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let file = File::create(&tmp_path).map_err(|e| IndexError::WriteFailed {
            path: tmp_path.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        bincode::serialize_into(&mut writer, &self.entries).map_err(|e| {
            IndexError::Encode {
                path: tmp_path.clone(),
                source: e,
            }
        })?;

        writer.flush().map_err(|e| IndexError::WriteFailed {
            path: tmp_path.clone(),
            source: e,
        })?;

        fs::rename(&tmp_path, path).map_err(|e| IndexError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Reads an index back from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| IndexError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);

        let entries = bincode::deserialize_from(reader).map_err(|e| IndexError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(zoom: u8, x: u32, y: u32) -> Tile {
        Tile::new(zoom, x, y)
    }

    #[test]
    fn test_empty_index() {
        let index = TileIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.get(1), &[]);
        assert!(!index.contains(1));
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = TileIndex::new();
        index.insert(42, tile(1, 0, 1));

        assert_eq!(index.get(42), &[tile(1, 0, 1)]);
        assert!(index.contains(42));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let mut index = TileIndex::new();
        index.insert(7, tile(1, 1, 1));
        index.insert(7, tile(1, 1, 1));

        assert_eq!(index.get(7).len(), 1);
    }

    #[test]
    fn test_multi_tile_assignment_sorted() {
        let mut index = TileIndex::new();
        index.insert(7, tile(1, 1, 0));
        index.insert(7, tile(1, 0, 0));
        index.insert(7, tile(1, 0, 1));

        assert_eq!(
            index.get(7),
            &[tile(1, 0, 0), tile(1, 1, 0), tile(1, 0, 1)]
        );
    }

    #[test]
    fn test_iter_ascending_ids() {
        let mut index = TileIndex::new();
        index.insert(30, tile(1, 0, 0));
        index.insert(10, tile(1, 0, 0));
        index.insert(20, tile(1, 1, 1));

        let ids: Vec<i64> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0").join("0").join("0.nodes.idx");

        let mut index = TileIndex::new();
        index.insert(1, tile(1, 0, 0));
        index.insert(2, tile(1, 1, 0));
        index.insert(2, tile(1, 1, 1));

        index.write(&path).unwrap();
        let restored = TileIndex::read(&path).unwrap();

        assert_eq!(restored, index);
    }

    #[test]
    fn test_write_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.nodes.idx");

        let mut index = TileIndex::new();
        index.insert(1, tile(1, 0, 0));
        index.write(&path).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["1.nodes.idx".to_string()]);
    }

    #[test]
    fn test_write_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path_a = dir.path().join("a.idx");
        let path_b = dir.path().join("b.idx");

        let mut first = TileIndex::new();
        first.insert(5, tile(1, 1, 0));
        first.insert(3, tile(1, 0, 0));

        // Same content inserted in a different order.
        let mut second = TileIndex::new();
        second.insert(3, tile(1, 0, 0));
        second.insert(5, tile(1, 1, 0));

        first.write(&path_a).unwrap();
        second.write(&path_b).unwrap();

        assert_eq!(fs::read(&path_a).unwrap(), fs::read(&path_b).unwrap());
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = TileIndex::read(dir.path().join("absent.idx"));
        assert!(matches!(result, Err(IndexError::ReadFailed { .. })));
    }
}
