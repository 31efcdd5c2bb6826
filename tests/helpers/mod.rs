//! Test helpers for flattening integration tests.
//!
//! Builds retail-style trees under a temp root and snapshots them so runs
//! can be compared file by file.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Write `content` to `root/rel`, creating parents.
pub fn write(root: &Path, rel: &str, content: &str) {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, content).unwrap();
}

/// The pre-flattening layout with one file under each source.
pub fn canonical_tree(root: &Path) {
    write(root, "apps/retail-api/apps/api/src/index.js", "api");
    write(root, "apps/retail-api/apps/api/scripts/build.sh", "#!/bin/sh\n");
    write(root, "apps/retail-api/apps/worker/main.js", "worker");
    write(root, "apps/retail-api/apps/web/App.jsx", "web");
}

/// Relative file path -> content, for every file under `root`.
/// Empty directories are listed with a trailing '/' and empty content.
pub fn snapshot(root: &Path) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.unwrap();
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/");
        if entry.file_type().is_file() {
            map.insert(rel, fs::read_to_string(entry.path()).unwrap());
        } else if entry.file_type().is_dir() && fs::read_dir(entry.path()).unwrap().next().is_none() {
            map.insert(format!("{rel}/"), String::new());
        }
    }
    map
}

/// Only the files (no empty-dir markers) of a snapshot.
pub fn files(root: &Path) -> Vec<String> {
    snapshot(root).into_keys().filter(|k| !k.ends_with('/')).collect()
}
