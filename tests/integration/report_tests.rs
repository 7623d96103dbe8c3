use hashdupe::duplicates::FinderConfig;
use hashdupe::error::ExitCode;
use hashdupe::run_scan;
use std::fs;
use tempfile::tempdir;

fn scan_output(root: &std::path::Path, config: FinderConfig) -> (ExitCode, String) {
    let mut out = Vec::new();
    let code = run_scan(root, config, &mut out, false).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_report_for_single_group() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("copy.txt"), b"same").unwrap();

    // Only one file at the top level besides `sub`, so the order within the
    // group depends on listing order; check both shapes.
    fs::write(dir.path().join("orig.txt"), b"same").unwrap();
    fs::write(dir.path().join("lonely.txt"), b"unique").unwrap();

    let (code, text) = scan_output(dir.path(), FinderConfig::default());
    assert_eq!(code, ExitCode::Success);

    let orig = dir.path().join("orig.txt").display().to_string();
    let copy = sub.join("copy.txt").display().to_string();
    let expected_a = format!("1 folders and 3 files found\n\n{orig}\n    {copy}\n\n");
    let expected_b = format!("1 folders and 3 files found\n\n{copy}\n    {orig}\n\n");
    assert!(
        text == expected_a || text == expected_b,
        "unexpected output:\n{text}"
    );
    assert!(!text.contains("lonely.txt"));
}

#[test]
fn test_report_without_duplicates_has_only_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"1").unwrap();
    fs::write(dir.path().join("b"), b"2").unwrap();

    let (code, text) = scan_output(dir.path(), FinderConfig::default());
    assert_eq!(code, ExitCode::Success);
    assert_eq!(text, "0 folders and 2 files found\n\n");
}

#[test]
fn test_report_for_empty_tree() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();

    let (_, text) = scan_output(dir.path(), FinderConfig::default());
    assert_eq!(text, "1 folders and 0 files found\n\n");
}

#[test]
fn test_progress_line_separator() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"1").unwrap();
    fs::write(dir.path().join("b"), b"1").unwrap();

    let mut out = Vec::new();
    run_scan(dir.path(), FinderConfig::default(), &mut out, true).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("0 folders and 2 files found\n\n\n"));
    assert!(text.ends_with("\n\n"));
}

#[test]
fn test_invalid_root_writes_nothing() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let mut out = Vec::new();
    let err = run_scan(&missing, FinderConfig::default(), &mut out, false).unwrap_err();

    assert!(err.to_string().starts_with("Path doesn't exist"));
    assert!(out.is_empty());
}
