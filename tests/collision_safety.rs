use retail_flatten::{Outcome, run};
use tempfile::tempdir;

mod helpers;

#[test]
fn existing_child_is_preserved_and_siblings_move() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    helpers::canonical_tree(root);
    helpers::write(root, "apps/retail-api/apps/api/src/util.js", "util");
    helpers::write(root, "apps/retail-api/src/index.js", "already flattened");

    let report = run(root)?;

    let snap = helpers::snapshot(root);
    assert_eq!(snap["apps/retail-api/src/index.js"], "already flattened");
    assert_eq!(snap["apps/retail-api/src/util.js"], "util");
    // The colliding source copy stays where it was, and so does its parent.
    assert_eq!(snap["apps/retail-api/apps/api/src/index.js"], "api");

    assert!(report.outcomes().contains(&Outcome::SkippedChild {
        src: "apps/retail-api/apps/api/src/index.js".into(),
        dst: "apps/retail-api/src/index.js".into(),
    }));
    assert!(report.outcomes().contains(&Outcome::MovedChild {
        src: "apps/retail-api/apps/api/src/util.js".into(),
        dst: "apps/retail-api/src/util.js".into(),
    }));
    assert_eq!(report.skipped(), 1);
    Ok(())
}

#[test]
fn existing_worker_destination_skips_whole_rule() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    helpers::canonical_tree(root);
    helpers::write(root, "apps/retail-worker/README.md", "new worker");

    let report = run(root)?;

    let snap = helpers::snapshot(root);
    assert_eq!(snap["apps/retail-worker/README.md"], "new worker");
    assert!(!snap.contains_key("apps/retail-worker/main.js"));
    assert_eq!(snap["apps/retail-api/apps/worker/main.js"], "worker");
    assert!(report.outcomes().contains(&Outcome::DestinationExists {
        src: "apps/retail-api/apps/worker".into(),
        dst: "apps/retail-worker".into(),
    }));
    // Leftover worker keeps the nested root alive.
    assert!(root.join("apps/retail-api/apps").is_dir());
    assert!(!root.join("apps/retail-api/apps/api").exists());
    Ok(())
}

#[test]
fn scripts_merge_into_existing_dir() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    helpers::canonical_tree(root);
    helpers::write(root, "apps/retail-api/scripts/seed.sh", "seed");

    let report = run(root)?;

    let snap = helpers::snapshot(root);
    assert_eq!(snap["apps/retail-api/scripts/seed.sh"], "seed");
    assert_eq!(snap["apps/retail-api/scripts/build.sh"], "#!/bin/sh\n");
    assert!(report.outcomes().contains(&Outcome::RemovedDir {
        dir: "apps/retail-api/apps/api/scripts".into(),
    }));
    assert!(!root.join("apps/retail-api/apps").exists());
    Ok(())
}
