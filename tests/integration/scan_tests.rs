use hashdupe::duplicates::{DuplicateFinder, FinderConfig, Scan};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let report = finder.find_duplicates(dir.path()).unwrap();

    assert!(report.groups.is_empty());
    assert_eq!(report.counts().folders, 0);
    assert_eq!(report.counts().files, 0);
    assert_eq!(report.state.processed, 0);
}

#[test]
fn test_scan_only_empty_folders() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();
    fs::create_dir(dir.path().join("c")).unwrap();

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.counts().folders, 3);
    assert_eq!(report.counts().files, 0);
    assert!(report.groups.is_empty());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();

    // Create 3 unique files
    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"content a")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"content b")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"content c")
        .unwrap();

    let finder = DuplicateFinder::with_defaults();
    let report = finder.find_duplicates(dir.path()).unwrap();

    assert!(report.groups.is_empty());
    assert_eq!(report.counts().files, 3);
    assert_eq!(report.duplicate_files(), 0);
}

#[test]
fn test_scan_duplicate_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    let c = dir.path().join("c.txt");

    // Create 2 identical files and 1 unique
    fs::write(&a, b"duplicate").unwrap();
    fs::write(&b, b"duplicate").unwrap();
    fs::write(&c, b"unique").unwrap();

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.duplicate_groups(), 1);
    assert_eq!(report.duplicate_files(), 1);

    // Whichever of a/b was listed first is the original.
    let group = &report.groups[0];
    let members: BTreeSet<PathBuf> = group.paths().cloned().collect();
    assert_eq!(members, BTreeSet::from([a, b]));
    assert_eq!(group.duplicates.len(), 1);
    assert!(!group.paths().any(|p| *p == c));
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir");
    let deeper = sub.join("deeper");
    fs::create_dir_all(&deeper).unwrap();

    fs::write(dir.path().join("a.txt"), b"nested duplicate").unwrap();
    fs::write(sub.join("b.txt"), b"nested duplicate").unwrap();
    fs::write(deeper.join("c.txt"), b"nested duplicate").unwrap();
    fs::write(deeper.join("d.txt"), b"other").unwrap();

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.counts().folders, 2);
    assert_eq!(report.counts().files, 4);
    assert_eq!(report.duplicate_groups(), 1);
    assert_eq!(report.groups[0].duplicate_count(), 2);
    assert_eq!(report.duplicate_files(), 2);
}

#[test]
fn test_multiple_groups() {
    let dir = tempdir().unwrap();
    for (name, content) in [
        ("x1", "xxx"),
        ("y1", "yyy"),
        ("x2", "xxx"),
        ("y2", "yyy"),
        ("y3", "yyy"),
        ("z", "zzz"),
    ] {
        fs::write(dir.path().join(name), content).unwrap();
    }

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.duplicate_groups(), 2);
    assert_eq!(report.duplicate_files(), 3);
    let mut sizes: Vec<usize> = report.groups.iter().map(|g| g.paths().count()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![2, 3]);
}

#[test]
fn test_processed_equals_counted() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        let sub = dir.path().join(format!("dir_{i}"));
        fs::create_dir(&sub).unwrap();
        for j in 0..4 {
            fs::write(sub.join(format!("f{j}")), format!("{}", j % 2)).unwrap();
        }
    }

    let mut scan = Scan::new(dir.path(), FinderConfig::default());
    let counts = scan.count().unwrap();
    scan.classify().unwrap();

    assert_eq!(counts.folders, 5);
    assert_eq!(counts.files, 20);
    assert_eq!(scan.counters().processed, counts.files);
    // Two distinct contents: 20 files, 2 originals.
    assert_eq!(scan.counters().duplicates, 18);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("a"), b"one").unwrap();
    fs::write(sub.join("a"), b"one").unwrap();
    fs::write(sub.join("b"), b"two").unwrap();
    fs::write(dir.path().join("b"), b"two").unwrap();
    fs::write(dir.path().join("c"), b"three").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let first = finder.find_duplicates(dir.path()).unwrap();
    let second = finder.find_duplicates(dir.path()).unwrap();

    let as_sets = |report: &hashdupe::duplicates::ScanReport| {
        report
            .groups
            .iter()
            .map(|g| (g.hash, g.paths().cloned().collect::<BTreeSet<_>>()))
            .collect::<BTreeSet<_>>()
    };
    assert_eq!(as_sets(&first), as_sets(&second));
    assert_eq!(first.counts(), second.counts());
}

#[test]
fn test_small_buffer_gives_same_groups() {
    let dir = tempdir().unwrap();
    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 253) as u8).collect();
    fs::write(dir.path().join("big1.bin"), &data).unwrap();
    fs::write(dir.path().join("big2.bin"), &data).unwrap();

    let default = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let tiny = DuplicateFinder::new(FinderConfig::default().with_buffer_size(13))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(default.duplicate_groups(), 1);
    assert_eq!(tiny.duplicate_groups(), 1);
    assert_eq!(default.groups[0].hash, tiny.groups[0].hash);
}
