//! Error types for tile storage operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::stream::StreamError;

/// Errors that can occur while managing on-disk tile state.
#[derive(Debug)]
pub enum StorageError {
    /// Failed to create a tile directory.
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Failed to write an extract record.
    ExtractWrite {
        path: PathBuf,
        source: StreamError,
    },

    /// Failed to delete a consumed extract.
    RemoveFailed { path: PathBuf, source: io::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            StorageError::ExtractWrite { path, source } => {
                write!(f, "failed to write extract {}: {}", path.display(), source)
            }
            StorageError::RemoveFailed { path, source } => {
                write!(f, "failed to delete extract {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::CreateDirFailed { source, .. } => Some(source),
            StorageError::ExtractWrite { source, .. } => Some(source),
            StorageError::RemoveFailed { source, .. } => Some(source),
        }
    }
}
