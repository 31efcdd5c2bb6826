//! Typed error definitions for retail_flatten.
//! Only failures that abort a run live here; collisions and missing sources
//! are outcomes, not errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("Repository root is missing or not a directory: {}", .0.display())]
    RootInvalid(PathBuf),

    #[error("Could not determine the repository root: {0}")]
    RootUnresolved(String),

    #[error("{op} '{}' -> '{}': {source}", .src.display(), .dst.display())]
    MoveFailed {
        op: &'static str,
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot list directory {}: {source}", .path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FlattenError {
    /// Stable numeric code, logged alongside the message.
    pub fn code(&self) -> u16 {
        match self {
            FlattenError::RootInvalid(_) => 10,
            FlattenError::RootUnresolved(_) => 11,
            FlattenError::MoveFailed { .. } => 20,
            FlattenError::ReadDirFailed { .. } => 21,
        }
    }

    /// Short machine-friendly kind used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FlattenError::RootInvalid(_) => "root_invalid",
            FlattenError::RootUnresolved(_) => "root_unresolved",
            FlattenError::MoveFailed { .. } => "move_failed",
            FlattenError::ReadDirFailed { .. } => "read_dir_failed",
        }
    }
}
