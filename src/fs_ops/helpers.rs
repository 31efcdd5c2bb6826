//! I/O error helpers.
//!
//! Turns a raw io::Error from a move into a typed `FlattenError::MoveFailed`
//! and derives platform-aware hints for the operator.
//!
//! Usage:
//!   fs::rename(src, dst).map_err(move_error("rename", src, dst))?;

use std::io;
use std::path::Path;

use crate::errors::FlattenError;

/// Actionable hint for an io::Error, including the raw OS code when present.
pub fn io_hint(e: &io::Error) -> Option<String> {
    let mut hint: Option<&str> = None;

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            hint = match code {
                libc::EACCES | libc::EPERM => {
                    Some("permission denied; check ownership and write permissions")
                }
                libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
                libc::EBUSY => Some("resource busy; ensure no other process holds the tree"),
                libc::ENOTEMPTY => Some("destination appeared and is not empty; re-run to skip it"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::ENAMETOOLONG => Some("filename or path too long"),
                _ => None,
            };
        }
        #[cfg(windows)]
        {
            hint = match code {
                5 => Some("access denied; check permissions"),
                17 => Some("not same device; cross-filesystem move"),
                32 => Some("sharing violation; a file is in use"),
                112 => Some("insufficient disk space"),
                19 => Some("write protected / read-only media"),
                206 => Some("filename or path too long"),
                _ => None,
            };
        }
        let text = hint.unwrap_or("unexpected filesystem error");
        return Some(format!("{text} [os code: {code}]"));
    }

    hint = match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path vanished during the move; re-run to continue"),
        io::ErrorKind::AlreadyExists => Some("destination appeared during the move; re-run to skip it"),
        _ => hint,
    };
    hint.map(str::to_owned)
}

/// Adapter for `.map_err(...)`: wraps the io::Error as a `MoveFailed`
/// naming the operation and both ends of the move.
pub fn move_error<'a>(
    op: &'static str,
    src: &'a Path,
    dst: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |source: io::Error| {
        FlattenError::MoveFailed {
            op,
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        }
        .into()
    }
}
