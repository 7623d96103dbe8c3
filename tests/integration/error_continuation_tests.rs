#![cfg(unix)]

use hashdupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use hashdupe::error::ExitCode;
use hashdupe::run_scan;
use hashdupe::scanner::{HashError, ScanError};
use std::fs;
use std::os::unix::fs::symlink;
use tempfile::tempdir;

fn tree_with_dangling_link() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"dup").unwrap();
    fs::write(dir.path().join("b.txt"), b"dup").unwrap();
    symlink(dir.path().join("vanished"), dir.path().join("broken")).unwrap();
    dir
}

#[test]
fn test_unreadable_file_stops_scan() {
    let dir = tree_with_dangling_link();

    let result = DuplicateFinder::with_defaults().find_duplicates(dir.path());

    match result {
        Err(FinderError::Scan(ScanError::Hash(HashError::NotFound(path)))) => {
            assert!(path.ends_with("broken"));
        }
        other => panic!("Expected NotFound HashError, got: {:?}", other),
    }
}

#[test]
fn test_skip_errors_continues_and_reports() {
    let dir = tree_with_dangling_link();
    let config = FinderConfig::default().with_skip_errors(true);

    let mut out = Vec::new();
    let code = run_scan(dir.path(), config, &mut out, false).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(code, ExitCode::PartialSuccess);
    assert!(text.starts_with("0 folders and 3 files found\n\n"));
    assert!(text.contains("Skipped 1 entries:\n    File not found: "));
    assert!(text.contains("a.txt"));
    assert!(text.contains("b.txt"));
}

#[test]
fn test_skip_errors_without_failures_is_success() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"x").unwrap();

    let config = FinderConfig::default().with_skip_errors(true);
    let mut out = Vec::new();
    let code = run_scan(dir.path(), config, &mut out, false).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!String::from_utf8(out).unwrap().contains("Skipped"));
}
