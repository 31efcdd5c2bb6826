//! Repository root resolution.
//! The tool ships in `<repo>/scripts/`, so the default root is the parent of
//! the directory holding the executable.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::FlattenError;

use super::types::Config;

/// Root derived from the running executable's location.
pub fn default_repository_root() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| FlattenError::RootUnresolved(format!("cannot locate executable: {e}")))?;
    let exe = dunce::canonicalize(&exe).unwrap_or(exe);
    root_for_executable(&exe)
}

/// `<repo>/scripts/tool` -> `<repo>`.
pub fn root_for_executable(exe: &Path) -> Result<PathBuf> {
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            FlattenError::RootUnresolved(format!("executable {} has no grandparent directory", exe.display()))
                .into()
        })
}

/// Effective root for `cfg`: the explicit one if set, else the default.
/// The result is canonical and is an existing directory.
pub fn resolve_repository_root(cfg: &Config) -> Result<PathBuf> {
    let root = match &cfg.repository_root {
        Some(p) => p.clone(),
        None => default_repository_root()?,
    };
    let canonical = dunce::canonicalize(&root).map_err(|_| FlattenError::RootInvalid(root.clone()))?;
    if !canonical.is_dir() {
        return Err(FlattenError::RootInvalid(canonical).into());
    }
    debug!(root = %canonical.display(), "resolved repository root");
    Ok(canonical)
}
