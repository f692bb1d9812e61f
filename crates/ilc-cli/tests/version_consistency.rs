//! Integration test: the repository's own `ilc.yaml` is consistent.

use std::path::PathBuf;

use ilc_cli::config::{Workspace, CONFIG_FILE};
use ilc_cli::version;

fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn workspace() -> Workspace {
    Workspace::from_config_file(&repo_root().join(CONFIG_FILE)).expect("Failed to load ilc.yaml")
}

#[test]
fn repository_version_is_consistent() {
    let ws = workspace();
    let config = ws.version_config().unwrap();
    assert!(!config.files.is_empty());
    if let Err(e) = version::check(&ws.root, config) {
        panic!("{e}");
    }
}

#[test]
fn configured_version_matches_the_crate_version() {
    let ws = workspace();
    assert_eq!(
        ws.version_config().unwrap().current_version,
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn configured_schema_dir_exists() {
    assert!(workspace().schema_dir().join("match.schema.json").is_file());
}

#[test]
fn bump_in_a_copy_leaves_the_copy_consistent() {
    let ws = workspace();
    let config = ws.version_config().unwrap().clone();

    let tmp = tempfile::tempdir().unwrap();
    for file in &config.files {
        std::fs::copy(ws.root.join(&file.filename), tmp.path().join(&file.filename)).unwrap();
    }

    let next = version::bump_part(&config.current_version, version::Part::Minor).unwrap();
    version::bump(tmp.path(), &config, &next).unwrap();

    let bumped = Workspace::from_config_file(&tmp.path().join(CONFIG_FILE)).unwrap();
    let bumped_config = bumped.version_config().unwrap();
    assert_eq!(bumped_config.current_version, next);
    version::check(tmp.path(), bumped_config).unwrap();
}

#[test]
fn package_metadata_comes_from_the_workspace() {
    assert_eq!(env!("CARGO_PKG_LICENSE"), "MIT");
    assert_eq!(
        env!("CARGO_PKG_REPOSITORY"),
        "https://github.com/ilc-project/ilc-models"
    );
}
