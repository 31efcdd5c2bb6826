use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::FlattenError;

/// Immediate children of `dir`, sorted by name so runs are reproducible.
pub fn list_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_failed = |source: std::io::Error| FlattenError::ReadDirFailed {
        path: dir.to_path_buf(),
        source,
    };
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_failed)? {
        children.push(entry.map_err(read_failed)?.path());
    }
    children.sort();
    debug!(dir = %dir.display(), count = children.len(), "listed children");
    Ok(children)
}
