use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// True if anything occupies `path`, including a dangling symlink.
pub(crate) fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// True if `path` is a real directory (symlinks are not followed).
pub(crate) fn is_real_dir(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

/// Hidden, process-unique sibling name inside `dir` for staging a copy.
pub(crate) fn unique_temp_path(dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dir.join(format!(".retail_flatten.{pid}.{nanos}.tmp"))
}

pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    // std::io::ErrorKind has no stable CrossesDevices variant on our MSRV,
    // so detect EXDEV / ERROR_NOT_SAME_DEVICE via raw OS error codes.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(unix)]
pub(crate) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

#[cfg(not(unix))]
pub(crate) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn entry_exists_sees_files_and_dirs() {
        let td = tempdir().unwrap();
        let f = td.path().join("f.txt");
        fs::write(&f, b"x").unwrap();
        assert!(entry_exists(&f));
        assert!(entry_exists(td.path()));
        assert!(!entry_exists(&td.path().join("nope")));
        assert!(is_real_dir(td.path()));
        assert!(!is_real_dir(&f));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_entry() {
        let td = tempdir().unwrap();
        let link = td.path().join("dangling");
        std::os::unix::fs::symlink(td.path().join("missing"), &link).unwrap();
        assert!(!link.exists());
        assert!(entry_exists(&link));
        assert!(!is_real_dir(&link));
    }

    #[test]
    fn plain_error_is_not_cross_device() {
        let e = io::Error::new(io::ErrorKind::Other, "boom");
        assert!(!is_cross_device(&e));
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let td = tempdir().unwrap();
        let p = unique_temp_path(td.path());
        assert_eq!(p.parent(), Some(td.path()));
        assert!(p.file_name().unwrap().to_string_lossy().starts_with(".retail_flatten."));
        assert!(!p.exists());
    }
}
