//! Length-prefixed binary entity records.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::entity::Entity;

use super::{EntitySource, StreamError};

/// Reads one length-prefixed record from `reader`.
///
/// Returns `None` on a clean end of stream (EOF at a record boundary); a
/// truncated record is a decode error.
pub(crate) fn read_record<R: Read>(reader: &mut R) -> Result<Option<Entity>, StreamError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(StreamError::Io(e)),
    }

    let len = u32::from_le_bytes(len_buf) as usize;
    let mut body = vec![0u8; len];
    reader
        .read_exact(&mut body)
        .map_err(|e| StreamError::Decode(format!("truncated record body: {}", e)))?;

    bincode::deserialize(&body).map_err(|e| StreamError::Decode(e.to_string()))
}

/// Writes one length-prefixed record to `writer`.
pub(crate) fn write_record<W: Write>(writer: &mut W, entity: &Entity) -> Result<(), StreamError> {
    let body = bincode::serialize(entity).map_err(|e| StreamError::Encode(e.to_string()))?;
    let len = u32::try_from(body.len())
        .map_err(|_| StreamError::Encode(format!("record too large: {} bytes", body.len())))?;

    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&body)?;
    Ok(())
}

/// Resettable entity source over a seekable byte stream.
///
/// This is the repository's native input format: a flat sequence of
/// length-prefixed records, ordered nodes before ways before relations.
pub struct BinaryReader<R: Read + Seek> {
    inner: R,
}

impl BinaryReader<BufReader<File>> {
    /// Opens a record stream from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read + Seek> BinaryReader<R> {
    /// Wraps a seekable byte stream positioned at the first record.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read + Seek> EntitySource for BinaryReader<R> {
    fn can_reset(&self) -> bool {
        true
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        self.inner.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    fn next_entity(&mut self) -> Result<Option<Entity>, StreamError> {
        read_record(&mut self.inner)
    }
}

/// Entity record writer over a byte sink.
pub struct BinaryWriter<W: Write> {
    inner: W,
}

impl BinaryWriter<BufWriter<File>> {
    /// Creates a record stream at `path`, truncating any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> BinaryWriter<W> {
    /// Wraps a byte sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Appends one entity record.
    pub fn write_entity(&mut self, entity: &Entity) -> Result<(), StreamError> {
        write_record(&mut self.inner, entity)
    }

    /// Flushes buffered records to the sink.
    pub fn finish(mut self) -> Result<(), StreamError> {
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Member, MemberKind, Node, Relation, Way};
    use std::io::Cursor;

    fn sample_entities() -> Vec<Entity> {
        vec![
            Entity::Node(Node::new(1, 4.35, 50.86)),
            Entity::Node(Node::new(2, -0.12, 51.5)),
            Entity::Way(Way::new(10, vec![1, 2])),
            Entity::Relation(Relation::new(
                100,
                vec![
                    Member::new(MemberKind::Node, 1),
                    Member::with_role(MemberKind::Way, 10, "outer"),
                ],
            )),
        ]
    }

    fn encode(entities: &[Entity]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = BinaryWriter::new(&mut buf);
            for entity in entities {
                writer.write_entity(entity).unwrap();
            }
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_write_then_read_back() {
        let entities = sample_entities();
        let buf = encode(&entities);

        let mut reader = BinaryReader::new(Cursor::new(buf));
        let mut decoded = Vec::new();
        while let Some(entity) = reader.next_entity().unwrap() {
            decoded.push(entity);
        }

        assert_eq!(decoded, entities);
    }

    #[test]
    fn test_reset_rewinds_to_first_record() {
        let entities = sample_entities();
        let mut reader = BinaryReader::new(Cursor::new(encode(&entities)));

        assert!(reader.can_reset());
        let first = reader.next_entity().unwrap().unwrap();
        reader.next_entity().unwrap();

        reader.reset().unwrap();
        let again = reader.next_entity().unwrap().unwrap();
        assert_eq!(again, first);
    }

    #[test]
    fn test_empty_stream_yields_none() {
        let mut reader = BinaryReader::new(Cursor::new(Vec::new()));
        assert!(reader.next_entity().unwrap().is_none());
    }

    #[test]
    fn test_truncated_record_is_decode_error() {
        let mut buf = encode(&sample_entities());
        buf.truncate(buf.len() - 3);

        let mut reader = BinaryReader::new(Cursor::new(buf));
        let outcome = loop {
            match reader.next_entity() {
                Ok(Some(_)) => continue,
                other => break other,
            }
        };
        assert!(matches!(outcome, Err(StreamError::Decode(_))));
    }
}
