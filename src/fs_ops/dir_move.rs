//! Wholesale relocation of a file or directory subtree.
//! Tries a rename first; on a cross-device error, copies the tree and removes the source.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::helpers::move_error;
use super::util::{fsync_dir, is_cross_device, unique_temp_path};

/// Relocate `src` to exactly `dst`. The caller guarantees `dst` is free.
/// Missing parents of `dst` are created.
pub fn relocate(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(move_error("create destination parent", src, parent))?;
    }

    match fs::rename(src, dst) {
        Ok(()) => {
            // Ignore fsync errors to avoid turning a successful rename into a failure.
            if let Some(parent) = dst.parent() {
                let _ = fsync_dir(parent);
            }
            debug!(src = %src.display(), dest = %dst.display(), "Renamed atomically");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            debug!(src = %src.display(), dest = %dst.display(), "Cross-device rename; copying instead");
            copy_then_remove(src, dst)
        }
        Err(e) => Err(move_error("rename", src, dst)(e)),
    }
}

/// Copy `src` into a hidden staging sibling of `dst`, publish it with a
/// rename, then remove `src`. A failed copy leaves neither `dst` nor the
/// staging entry behind, so a later run still sees the destination as free.
fn copy_then_remove(src: &Path, dst: &Path) -> Result<()> {
    let parent = dst.parent().unwrap_or_else(|| Path::new("."));
    let staging = unique_temp_path(parent);

    let meta = fs::symlink_metadata(src).map_err(move_error("stat source", src, dst))?;
    if let Err(e) = copy_tree(src, &staging, &meta) {
        discard(&staging);
        return Err(e);
    }
    if let Err(e) = fs::rename(&staging, dst) {
        discard(&staging);
        return Err(move_error("publish staged copy", &staging, dst)(e));
    }
    let _ = fsync_dir(parent);

    if meta.file_type().is_dir() {
        fs::remove_dir_all(src).map_err(move_error("remove source directory", src, dst))?;
    } else {
        fs::remove_file(src).map_err(move_error("remove source file", src, dst))?;
    }
    info!(src = %src.display(), dest = %dst.display(), "Copied across devices and removed source");
    Ok(())
}

fn copy_tree(src: &Path, staging: &Path, meta: &fs::Metadata) -> Result<()> {
    if !meta.file_type().is_dir() {
        return copy_entry(src, staging, meta);
    }

    // Directories first, so every file copy has its parent in place.
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| {
            let io = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop while walking source"));
            move_error("walk source tree", src, staging)(io)
        })?;
        let rel = entry.path().strip_prefix(src)?;
        let target = staging.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(move_error("create directory", entry.path(), &target))?;
        } else {
            let meta = entry.metadata().map_err(|e| {
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                move_error("stat source entry", entry.path(), &target)(io)
            })?;
            copy_entry(entry.path(), &target, &meta)?;
        }
    }
    Ok(())
}

/// Best-effort removal of a staging entry after a failed copy.
fn discard(staging: &Path) {
    let res = match fs::symlink_metadata(staging) {
        Ok(m) if m.file_type().is_dir() => fs::remove_dir_all(staging),
        Ok(_) => fs::remove_file(staging),
        Err(_) => return,
    };
    if let Err(e) = res {
        debug!(path = %staging.display(), error = %e, "could not discard staging copy");
    }
}

fn copy_entry(src: &Path, dst: &Path, meta: &fs::Metadata) -> Result<()> {
    #[cfg(unix)]
    if meta.file_type().is_symlink() {
        let target = fs::read_link(src).map_err(move_error("read symlink", src, dst))?;
        std::os::unix::fs::symlink(&target, dst).map_err(move_error("recreate symlink", src, dst))?;
        return Ok(());
    }
    #[cfg(not(unix))]
    let _ = meta;

    fs::copy(src, dst).map_err(move_error("copy file", src, dst))?;
    Ok(())
}
