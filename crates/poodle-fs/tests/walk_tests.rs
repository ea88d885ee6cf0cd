use poodle_fs::{NormalizedPath, io, list_files};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_list_files_filters_by_extension_and_recurses() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("team")).unwrap();
    fs::write(root.join("github.toml"), "a").unwrap();
    fs::write(root.join("README.md"), "b").unwrap();
    fs::write(root.join("team/billing.TOML"), "c").unwrap();

    let files = list_files(&NormalizedPath::new(root), Some("toml")).unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();

    assert_eq!(names, vec!["github.toml", "team/billing.TOML"]);
}

#[test]
fn test_list_files_reports_modification_time() {
    let temp = TempDir::new().unwrap();
    let file = NormalizedPath::new(temp.path().join("a.toml"));
    io::write_text(&file, "x").unwrap();
    io::set_modified_timestamp(&file, 1_700_000_000).unwrap();

    let files = list_files(&NormalizedPath::new(temp.path()), Some("toml")).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].modified, 1_700_000_000);
    assert_eq!(files[0].absolute, file);
}

#[test]
fn test_list_files_skips_atomic_write_leftovers() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".a.toml.123.tmp"), "x").unwrap();

    let files = list_files(&NormalizedPath::new(temp.path()), None).unwrap();

    assert!(files.is_empty());
}

#[test]
fn test_list_files_missing_dir_is_empty() {
    let files = list_files(&NormalizedPath::new("/nonexistent/poodle/defs"), None).unwrap();
    assert!(files.is_empty());
}
