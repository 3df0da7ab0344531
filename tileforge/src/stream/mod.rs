//! Entity stream sources and the on-disk record format.
//!
//! A build consumes entities through the [`EntitySource`] trait. The root
//! pass reads the full input stream and makes one logical pass per entity
//! kind, so the root source must support being reset to the beginning.
//! Deeper levels read per-tile extract files instead, which are consumed
//! exactly once and therefore never reset.
//!
//! Records on disk are length-prefixed: a little-endian `u32` byte count
//! followed by the bincode-encoded [`Entity`](crate::entity::Entity).

mod binary;
mod extract;
mod memory;

pub use binary::{BinaryReader, BinaryWriter};
pub use extract::ExtractReader;
pub use memory::MemorySource;

use thiserror::Error;

use crate::entity::Entity;

/// Errors that can occur while reading or writing an entity stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// I/O error on the underlying stream.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entity record could not be decoded.
    #[error("malformed entity record: {0}")]
    Decode(String),

    /// An entity record could not be encoded.
    #[error("failed to encode entity record: {0}")]
    Encode(String),

    /// Reset was requested on a source that cannot be reset.
    #[error("source does not support reset")]
    NotResettable,
}

/// A forward stream of entities.
///
/// Implementations yield entities in input order. Sources backing the root
/// pass report `can_reset() == true` and rewind on [`reset`](Self::reset);
/// extract-backed sources are read-once.
pub trait EntitySource {
    /// Returns true if this source can be rewound to the beginning.
    fn can_reset(&self) -> bool;

    /// Rewinds the source to the beginning.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::NotResettable`] for read-once sources, or an
    /// I/O error if rewinding fails.
    fn reset(&mut self) -> Result<(), StreamError>;

    /// Yields the next entity, or `None` at end of stream.
    fn next_entity(&mut self) -> Result<Option<Entity>, StreamError>;
}
