//! Parameterised discovery tests for `jenerator-discovery`.
//!
//! Each `#[case]` gets an isolated `TempDir`: no shared state.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use jenerator_core::WalkOptions;
use jenerator_discovery::locate_configs;
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn touch(dir: &TempDir, rel: &str) -> PathBuf {
    let path = dir.path().join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, "name: fixture\n").expect("write fixture");
    path
}

fn found_set(paths: Vec<PathBuf>) -> BTreeSet<PathBuf> {
    paths.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Exact-name matching at arbitrary depth
// ---------------------------------------------------------------------------

#[rstest]
#[case(&[])]
#[case(&["jenerator.yaml"])]
#[case(&["a/jenerator.yaml", "a/b/jenerator.yaml"])]
#[case(&["x/y/z/w/jenerator.yaml", "jenerator.yaml", ".git/jenerator.yaml", "m/jenerator.yaml"])]
fn finds_exactly_the_named_files(#[case] configs: &[&str]) {
    let dir = TempDir::new().expect("tempdir");
    let expected: BTreeSet<PathBuf> = configs.iter().map(|rel| touch(&dir, rel)).collect();

    // Near-misses that must never match.
    touch(&dir, "decoy/jenerator.yml");
    touch(&dir, "decoy/my-jenerator.yaml");
    touch(&dir, "decoy/jenerator.yaml.bak");
    touch(&dir, "decoy/JENERATOR.YAML.txt");

    let found = locate_configs(dir.path(), "jenerator.yaml", &WalkOptions::default()).expect("walk");
    assert_eq!(found.len(), configs.len());
    assert_eq!(found_set(found), expected);
}

#[test]
fn custom_config_name_is_honoured() {
    let dir = TempDir::new().expect("tempdir");
    touch(&dir, "svc/jenerator.yaml");
    let custom = touch(&dir, "svc/pipeline.yml");

    let found = locate_configs(dir.path(), "pipeline.yml", &WalkOptions::default()).expect("walk");
    assert_eq!(found, vec![custom]);
}

// ---------------------------------------------------------------------------
// Walk hardening
// ---------------------------------------------------------------------------

#[rstest]
#[case(Some(0), 0)]
#[case(Some(1), 1)]
#[case(Some(2), 2)]
#[case(Some(3), 3)]
#[case(None, 3)]
fn max_depth_bounds_the_walk(#[case] max_depth: Option<usize>, #[case] expected: usize) {
    let dir = TempDir::new().expect("tempdir");
    touch(&dir, "jenerator.yaml");
    touch(&dir, "a/jenerator.yaml");
    touch(&dir, "a/b/jenerator.yaml");

    let opts = WalkOptions { max_depth, ..WalkOptions::default() };
    // depth 0 is the root directory itself; its files sit at depth 1.
    let found = locate_configs(dir.path(), "jenerator.yaml", &opts).expect("walk");
    assert_eq!(found.len(), expected);
}

#[test]
fn excluded_directories_are_not_descended() {
    let dir = TempDir::new().expect("tempdir");
    let kept = touch(&dir, "svc/jenerator.yaml");
    touch(&dir, "node_modules/pkg/jenerator.yaml");
    touch(&dir, "svc/.git/jenerator.yaml");

    let opts = WalkOptions {
        exclude: vec!["node_modules".to_string(), ".git".to_string()],
        ..WalkOptions::default()
    };
    let found = locate_configs(dir.path(), "jenerator.yaml", &opts).expect("walk");
    assert_eq!(found, vec![kept]);
}

#[test]
fn exclusion_only_applies_to_directories() {
    let dir = TempDir::new().expect("tempdir");
    let kept = touch(&dir, "jenerator.yaml");
    let opts = WalkOptions {
        exclude: vec!["jenerator.yaml".to_string()],
        ..WalkOptions::default()
    };
    let found = locate_configs(dir.path(), "jenerator.yaml", &opts).expect("walk");
    assert_eq!(found, vec![kept]);
}

#[cfg(unix)]
#[test]
fn symlinked_config_file_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let shared = touch(&dir, "shared/base.yaml");
    fs::create_dir_all(dir.path().join("svc")).expect("mkdir");
    let link = dir.path().join("svc").join("jenerator.yaml");
    std::os::unix::fs::symlink(&shared, &link).expect("symlink");

    let found = locate_configs(dir.path(), "jenerator.yaml", &WalkOptions::default()).expect("walk");
    assert_eq!(found, vec![link]);
}

#[cfg(unix)]
#[test]
fn directory_symlinks_are_skipped_unless_followed() {
    let dir = TempDir::new().expect("tempdir");
    touch(&dir, "real/jenerator.yaml");
    std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).expect("symlink");

    let not_followed =
        locate_configs(dir.path(), "jenerator.yaml", &WalkOptions::default()).expect("walk");
    assert_eq!(not_followed.len(), 1);

    let opts = WalkOptions { follow_links: true, ..WalkOptions::default() };
    let followed = locate_configs(dir.path(), "jenerator.yaml", &opts).expect("walk");
    assert_eq!(followed.len(), 2);
}

#[cfg(unix)]
#[test]
fn symlink_loop_terminates_when_following_links() {
    let dir = TempDir::new().expect("tempdir");
    touch(&dir, "a/jenerator.yaml");
    std::os::unix::fs::symlink(dir.path(), dir.path().join("a").join("loop")).expect("symlink");

    let opts = WalkOptions { follow_links: true, ..WalkOptions::default() };
    let found = locate_configs(dir.path(), "jenerator.yaml", &opts).expect("walk");
    assert_eq!(found, vec![dir.path().join("a").join("jenerator.yaml")]);
}
