use retail_flatten::{Outcome, run};
use tempfile::tempdir;

mod helpers;

#[test]
fn leftovers_in_api_keep_it_in_place() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    helpers::canonical_tree(root);
    helpers::write(root, "apps/retail-api/apps/api/package.json", "{}");

    let report = run(root)?;

    assert!(root.join("apps/retail-api/apps/api/package.json").is_file());
    assert!(root.join("apps/retail-api/apps").is_dir());
    assert!(
        !report
            .outcomes()
            .iter()
            .any(|o| matches!(o, Outcome::RemovedDir { dir } if dir.ends_with("apps/api") || dir.ends_with("retail-api/apps")))
    );
    // Everything else still moved.
    assert_eq!(report.moved(), 4);
    Ok(())
}

#[test]
fn empty_source_dirs_from_a_prior_run_are_swept() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    std::fs::create_dir_all(root.join("apps/retail-api/apps/api"))?;

    let report = run(root)?;

    assert_eq!(report.removed(), 2);
    assert!(!root.join("apps/retail-api/apps").exists());
    assert!(root.join("apps/retail-api").is_dir());
    Ok(())
}
