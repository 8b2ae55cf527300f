use std::fs;
use std::path::Path;
use tempfile::tempdir;

use dirpatch_core::{DiffEngine, DiffOptions, Error, HashAlgorithm, SilentReporter};

/// Create the two roots of the worked example.
/// Layout:
///   a/
///     x.txt         ("hello")                ← only on A
///     y.txt         ("same")                 ← identical on both sides
///     sub/n.txt     ("nested")               ← identical on both sides
///     c.txt         ("left version")         ← conflicts with B
///   b/
///     y.txt         ("same")
///     sub/n.txt     ("nested")
///     c.txt         ("right version!")
///     z.txt         ("world")                ← only on B
fn create_test_roots(base: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let root_a = base.join("a");
    let root_b = base.join("b");
    fs::create_dir_all(root_a.join("sub")).unwrap();
    fs::create_dir_all(root_b.join("sub")).unwrap();

    fs::write(root_a.join("x.txt"), "hello").unwrap();
    fs::write(root_a.join("y.txt"), "same").unwrap();
    fs::write(root_a.join("sub/n.txt"), "nested").unwrap();
    fs::write(root_a.join("c.txt"), "left version").unwrap();

    fs::write(root_b.join("y.txt"), "same").unwrap();
    fs::write(root_b.join("sub/n.txt"), "nested").unwrap();
    fs::write(root_b.join("c.txt"), "right version!").unwrap();
    fs::write(root_b.join("z.txt"), "world").unwrap();

    (root_a, root_b)
}

fn options(root_a: &Path, root_b: &Path, destination: &Path) -> DiffOptions {
    DiffOptions {
        root_a: root_a.to_path_buf(),
        root_b: root_b.to_path_buf(),
        algorithm: HashAlgorithm::Md5,
        ignore_unchanged: false,
        ignore_patterns: vec![],
        destination: destination.to_path_buf(),
    }
}

#[test]
fn test_full_diff_pipeline() {
    let tmp = tempdir().unwrap();
    let (root_a, root_b) = create_test_roots(tmp.path());
    let destination = tmp.path().join("out/report.patch");

    let engine = DiffEngine::new(options(&root_a, &root_b, &destination));
    let summary = engine.run(&SilentReporter).unwrap();

    assert_eq!(summary.files_a, 4);
    assert_eq!(summary.files_b, 4);
    assert_eq!(summary.added_a, 1, "x.txt is only on A");
    assert_eq!(summary.added_b, 1, "z.txt is only on B");
    assert_eq!(summary.unchanged, 2, "y.txt and sub/n.txt match");
    assert_eq!(summary.conflicts, 1, "c.txt differs");

    let report = fs::read_to_string(&destination).unwrap();
    assert!(report.starts_with("# dirpatch report generated at "));
    assert!(report.contains(&format!("--- {}", root_a.display())));
    assert!(report.contains(&format!("--- {}", root_b.display())));

    // one line per classified path, carrying the md5 of that side's content
    assert!(report.contains("+ 5d41402abc4b2a76b9719d911017c592  5  x.txt"));
    let conflict_lines: Vec<&str> = report
        .lines()
        .filter(|l| l.starts_with("! "))
        .collect();
    assert_eq!(conflict_lines.len(), 2, "conflict appears once per block");
    assert!(conflict_lines.iter().all(|l| l.ends_with("  c.txt")));
    // each block reports its own side's size for the conflict
    assert!(conflict_lines.iter().any(|l| l.contains("  12  ")));
    assert!(conflict_lines.iter().any(|l| l.contains("  14  ")));

    let unchanged_lines = report.lines().filter(|l| l.starts_with("= ")).count();
    assert_eq!(unchanged_lines, 4, "two unchanged paths, mirrored in both blocks");
}

#[test]
fn test_diff_reports_are_deterministic() {
    let tmp = tempdir().unwrap();
    let (root_a, root_b) = create_test_roots(tmp.path());

    let first_dest = tmp.path().join("first.patch");
    let second_dest = tmp.path().join("second.patch");
    DiffEngine::new(options(&root_a, &root_b, &first_dest))
        .run(&SilentReporter)
        .unwrap();
    DiffEngine::new(options(&root_a, &root_b, &second_dest))
        .run(&SilentReporter)
        .unwrap();

    let strip_header = |report: String| -> String {
        report
            .lines()
            .filter(|l| !l.starts_with("# dirpatch report generated at"))
            .map(|l| format!("{}\n", l))
            .collect()
    };

    let first = strip_header(fs::read_to_string(&first_dest).unwrap());
    let second = strip_header(fs::read_to_string(&second_dest).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_ignore_unchanged_flag() {
    let tmp = tempdir().unwrap();
    let (root_a, root_b) = create_test_roots(tmp.path());
    let destination = tmp.path().join("quiet.patch");

    let mut opts = options(&root_a, &root_b, &destination);
    opts.ignore_unchanged = true;
    DiffEngine::new(opts).run(&SilentReporter).unwrap();

    let report = fs::read_to_string(&destination).unwrap();
    assert!(!report.lines().any(|l| l.starts_with("= ")));
    // additions and conflicts still present
    assert!(report.lines().any(|l| l.starts_with("+ ")));
    assert!(report.lines().any(|l| l.starts_with("! ")));
}

#[test]
fn test_ignore_patterns_exclude_from_both_sides() {
    let tmp = tempdir().unwrap();
    let (root_a, root_b) = create_test_roots(tmp.path());
    fs::write(root_a.join("noise.log"), "only here").unwrap();
    let destination = tmp.path().join("filtered.patch");

    let mut opts = options(&root_a, &root_b, &destination);
    opts.ignore_patterns = vec!["*.log".to_string()];
    let summary = DiffEngine::new(opts).run(&SilentReporter).unwrap();

    assert_eq!(summary.files_a, 4, "noise.log filtered out of the scan");
    let report = fs::read_to_string(&destination).unwrap();
    assert!(!report.contains("noise.log"));
}

#[test]
fn test_missing_root_fails_whole_run_without_report() {
    let tmp = tempdir().unwrap();
    let (root_a, _) = create_test_roots(tmp.path());
    let missing = tmp.path().join("gone");
    let destination = tmp.path().join("never.patch");

    let err = DiffEngine::new(options(&root_a, &missing, &destination))
        .run(&SilentReporter)
        .unwrap_err();

    assert!(matches!(err, Error::Scan { .. }));
    assert!(!destination.exists(), "no partial report on a fatal scan error");
}

#[test]
fn test_sha256_end_to_end() {
    let tmp = tempdir().unwrap();
    let (root_a, root_b) = create_test_roots(tmp.path());
    let destination = tmp.path().join("sha.patch");

    let mut opts = options(&root_a, &root_b, &destination);
    opts.algorithm = HashAlgorithm::Sha256;
    let summary = DiffEngine::new(opts).run(&SilentReporter).unwrap();

    // classification is digest-family independent
    assert_eq!(summary.unchanged, 2);
    assert_eq!(summary.conflicts, 1);

    let report = fs::read_to_string(&destination).unwrap();
    assert!(report
        .contains("+ 2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824  5  x.txt"));
}
