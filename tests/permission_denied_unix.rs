#![cfg(unix)]

use retail_flatten::{FlattenError, run};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

mod helpers;

/// A move that fails for a reason other than a collision aborts the run
/// before any later rule executes.
#[test]
fn unwritable_destination_aborts_remaining_rules() {
    // Skip if running as root; root may bypass permission checks and the test won't behave as expected.
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: running as root");
            return;
        }
    }

    let td = tempdir().expect("tempdir");
    let root = td.path();
    helpers::canonical_tree(root);

    // retail-api itself is read-only, so neither src nor the nested dirs can be renamed.
    let api_root = root.join("apps/retail-api");
    let mut perms = fs::metadata(&api_root).unwrap().permissions();
    perms.set_mode(0o555);
    fs::set_permissions(&api_root, perms).unwrap();

    let err = run(root).expect_err("expected permission denied error");
    let typed = err.downcast_ref::<FlattenError>().expect("typed error");
    assert_eq!(typed.kind(), "move_failed");
    assert!(err.to_string().to_ascii_lowercase().contains("permission denied"), "{err}");

    // The worker rule comes later and must not have run.
    assert!(root.join("apps/retail-api/apps/worker/main.js").is_file());
    assert!(!root.join("apps/retail-worker").exists());

    let mut restore = fs::metadata(&api_root).unwrap().permissions();
    restore.set_mode(0o755);
    let _ = fs::set_permissions(&api_root, restore);
}
