//! Best-effort removal of emptied directories.
//! Failure is an expected outcome here (leftover entries, already gone) and is never surfaced.

use std::fs;
use std::path::Path;
use tracing::debug;

/// Remove `dir` if it is an empty directory. Returns true when it was removed.
pub fn remove_dir_if_empty(dir: &Path) -> bool {
    match fs::remove_dir(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "removed empty directory");
            true
        }
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "left directory in place");
            false
        }
    }
}
