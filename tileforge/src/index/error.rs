//! Error types for index persistence.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while writing or reading an index file.
#[derive(Debug)]
pub enum IndexError {
    /// Failed to write the index or its temporary sibling.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to open or read an index file.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to encode the index.
    Encode {
        path: PathBuf,
        source: bincode::Error,
    },

    /// Failed to decode an index file.
    Decode {
        path: PathBuf,
        source: bincode::Error,
    },

    /// Index path has no file name component.
    InvalidPath(PathBuf),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::WriteFailed { path, source } => {
                write!(f, "failed to write index {}: {}", path.display(), source)
            }
            IndexError::ReadFailed { path, source } => {
                write!(f, "failed to read index {}: {}", path.display(), source)
            }
            IndexError::Encode { path, source } => {
                write!(f, "failed to encode index {}: {}", path.display(), source)
            }
            IndexError::Decode { path, source } => {
                write!(f, "failed to decode index {}: {}", path.display(), source)
            }
            IndexError::InvalidPath(path) => {
                write!(f, "invalid index path: {}", path.display())
            }
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::WriteFailed { source, .. } => Some(source),
            IndexError::ReadFailed { source, .. } => Some(source),
            IndexError::Encode { source, .. } => Some(source),
            IndexError::Decode { source, .. } => Some(source),
            IndexError::InvalidPath(_) => None,
        }
    }
}
