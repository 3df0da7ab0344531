//! Error types for the build pipeline.

use std::fmt;

use crate::index::IndexError;
use crate::storage::StorageError;
use crate::stream::StreamError;

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Fatal errors that abort a build.
///
/// Non-fatal conditions (dangling references, malformed coordinates,
/// missing extracts) are counted in the
/// [`BuildSummary`](crate::build::BuildSummary) and reported as warnings,
/// never as errors.
#[derive(Debug)]
pub enum BuildError {
    /// Unusable entity source or output directory, checked once at entry.
    InvalidArgument(String),

    /// The underlying entity stream failed mid-read.
    StreamRead(StreamError),

    /// Failed to write an extract or delete a consumed one.
    Storage(StorageError),

    /// Failed to persist an index.
    IndexWrite(IndexError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidArgument(msg) => {
                write!(f, "invalid argument: {}", msg)
            }
            BuildError::StreamRead(e) => {
                write!(f, "entity stream read failed: {}", e)
            }
            BuildError::Storage(e) => {
                write!(f, "tile storage failed: {}", e)
            }
            BuildError::IndexWrite(e) => {
                write!(f, "index write failed: {}", e)
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::InvalidArgument(_) => None,
            BuildError::StreamRead(e) => Some(e),
            BuildError::Storage(e) => Some(e),
            BuildError::IndexWrite(e) => Some(e),
        }
    }
}

impl From<StreamError> for BuildError {
    fn from(e: StreamError) -> Self {
        BuildError::StreamRead(e)
    }
}

impl From<StorageError> for BuildError {
    fn from(e: StorageError) -> Self {
        BuildError::Storage(e)
    }
}

impl From<IndexError> for BuildError {
    fn from(e: IndexError) -> Self {
        BuildError::IndexWrite(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_argument_display() {
        let err = BuildError::InvalidArgument("output directory does not exist".to_string());
        assert!(err.to_string().contains("invalid argument"));
        assert!(err.to_string().contains("output directory"));
    }

    #[test]
    fn test_stream_read_source_chain() {
        let err = BuildError::from(StreamError::NotResettable);
        assert!(matches!(err, BuildError::StreamRead(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_argument_has_no_source() {
        let err = BuildError::InvalidArgument("bad".to_string());
        assert!(err.source().is_none());
    }
}
