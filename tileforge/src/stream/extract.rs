//! Read-once source over a per-tile extract file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::entity::Entity;

use super::binary::read_record;
use super::{EntitySource, StreamError};

/// Entity source over one per-tile extract file.
///
/// Extracts are transient working storage: written by a parent level's pass,
/// consumed exactly once by the child level's pass, then deleted. The source
/// is deliberately not resettable; nothing may read an extract twice.
pub struct ExtractReader {
    inner: BufReader<File>,
}

impl ExtractReader {
    /// Opens an extract file for its single consumption.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened. Callers check for
    /// existence first; a missing extract is a skip condition, not an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let file = File::open(path)?;
        Ok(Self {
            inner: BufReader::new(file),
        })
    }
}

impl EntitySource for ExtractReader {
    fn can_reset(&self) -> bool {
        false
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        Err(StreamError::NotResettable)
    }

    fn next_entity(&mut self) -> Result<Option<Entity>, StreamError> {
        read_record(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Node;
    use crate::stream::BinaryWriter;

    #[test]
    fn test_reads_extract_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.nodes.osm.bin");

        let mut writer = BinaryWriter::create(&path).unwrap();
        writer
            .write_entity(&Entity::Node(Node::new(1, 4.0, 51.0)))
            .unwrap();
        writer
            .write_entity(&Entity::Node(Node::new(2, 5.0, 52.0)))
            .unwrap();
        writer.finish().unwrap();

        let mut reader = ExtractReader::open(&path).unwrap();
        assert_eq!(reader.next_entity().unwrap().unwrap().id(), 1);
        assert_eq!(reader.next_entity().unwrap().unwrap().id(), 2);
        assert!(reader.next_entity().unwrap().is_none());
    }

    #[test]
    fn test_extract_is_not_resettable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.nodes.osm.bin");
        BinaryWriter::create(&path).unwrap().finish().unwrap();

        let mut reader = ExtractReader::open(&path).unwrap();
        assert!(!reader.can_reset());
        assert!(matches!(reader.reset(), Err(StreamError::NotResettable)));
    }

    #[test]
    fn test_open_missing_extract_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ExtractReader::open(dir.path().join("absent.osm.bin")).is_err());
    }
}
