//! CLI error types.

use std::fmt;
use std::path::PathBuf;

/// Errors surfaced to the CLI user.
#[derive(Debug)]
pub enum CliError {
    /// Failed to open the input entity stream.
    InputOpen { path: PathBuf, message: String },

    /// The build failed.
    Build(String),

    /// Failed to read an index file.
    IndexRead { path: PathBuf, message: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputOpen { path, message } => {
                write!(f, "cannot open input {}: {}", path.display(), message)
            }
            CliError::Build(message) => {
                write!(f, "build failed: {}", message)
            }
            CliError::IndexRead { path, message } => {
                write!(f, "cannot read index {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_open_display() {
        let err = CliError::InputOpen {
            path: PathBuf::from("planet.ent.bin"),
            message: "No such file".to_string(),
        };
        assert!(err.to_string().contains("planet.ent.bin"));
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn test_build_display() {
        let err = CliError::Build("output directory missing".to_string());
        assert!(err.to_string().contains("build failed"));
    }
}
