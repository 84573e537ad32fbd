//! Integration tests for heft


use harness::{TestDir, run_heft};
use serde_json::Value;

#[test]
fn test_file_and_empty_directory() {
    let dir = TestDir::new();
    dir.add_file("a.bin", 500);
    dir.add_dir("empty");

    let (stdout, _stderr, success) = run_heft(dir.path(), &[]);
    assert!(success, "heft should succeed");
    assert!(stdout.contains("Size:        500 bytes"), "{}", stdout);
    assert!(stdout.contains("Files:       1"), "{}", stdout);
    assert!(stdout.contains("Directories: 1"), "{}", stdout);
    assert!(stdout.contains("Time:"));
    assert!(!stdout.contains("Skipped"));
}

#[test]
fn test_nested_sizes_roll_up() {
    let dir = TestDir::new();
    dir.add_file("sub/x.bin", 100);
    dir.add_file("y.bin", 50);

    let (stdout, _stderr, success) = run_heft(dir.path(), &["--tree"]);
    assert!(success);
    assert!(stdout.contains("Size:        150 bytes"), "{}", stdout);
    assert!(stdout.contains(".  150B  (2 files, 1 dir)"), "{}", stdout);
    assert!(stdout.contains("└── sub  100B  (1 file, 0 dirs)"), "{}", stdout);
}

#[test]
fn test_large_size_shows_unit_and_bytes() {
    let dir = TestDir::new();
    dir.add_file("big.bin", 3 * 1024 * 1024);

    let (stdout, _stderr, success) = run_heft(dir.path(), &[]);
    assert!(success);
    assert!(
        stdout.contains("Size:        3.00M  (3,145,728 bytes)"),
        "{}",
        stdout
    );
}

#[test]
fn test_path_argument() {
    let dir = TestDir::new();
    dir.add_file("inner/one.bin", 7);

    let target = dir.path().join("inner");
    let target = target.to_str().unwrap();
    let (stdout, _stderr, success) = run_heft(dir.path(), &["--tree", target]);
    assert!(success);
    assert!(stdout.contains(&format!("{}  7B  (1 file, 0 dirs)", target)), "{}", stdout);
}

#[test]
fn test_files_flag_lists_files() {
    let dir = TestDir::new();
    dir.add_file("sub/x.bin", 2048);

    let (stdout, _stderr, success) = run_heft(dir.path(), &["--files"]);
    assert!(success);
    assert!(stdout.contains("└── sub  2.0K  (1 file, 0 dirs)"), "{}", stdout);
    assert!(stdout.contains("    └── x.bin  2.0K"), "{}", stdout);
}

#[test]
fn test_level_limits_display_not_totals() {
    let dir = TestDir::new();
    dir.add_file("a/b/c/deep.bin", 10);

    let (stdout, _stderr, success) = run_heft(dir.path(), &["--tree", "-L", "1"]);
    assert!(success);
    assert!(stdout.contains("a  10B  (1 file, 2 dirs)"), "{}", stdout);
    assert!(!stdout.contains(" b  "), "{}", stdout);
    assert!(stdout.contains("Directories: 3"));
}

#[test]
fn test_exclude_pattern() {
    let dir = TestDir::new();
    dir.add_file("keep.bin", 10);
    dir.add_file("drop.log", 1000);
    dir.add_file("target/huge.bin", 5000);

    let (stdout, _stderr, success) =
        run_heft(dir.path(), &["-x", "*.log", "--exclude", "target"]);
    assert!(success);
    assert!(stdout.contains("Size:        10 bytes"), "{}", stdout);
    assert!(stdout.contains("Files:       1"));
    assert!(stdout.contains("Directories: 0"));
}

#[test]
fn test_json_summary() {
    let dir = TestDir::new();
    dir.add_file("sub/x.bin", 100);
    dir.add_file("y.bin", 50);

    let (stdout, _stderr, success) = run_heft(dir.path(), &["--json"]);
    assert!(success);
    let json: Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["summary"]["size"], 150);
    assert_eq!(json["summary"]["files"], 2);
    assert_eq!(json["summary"]["directories"], 1);
    assert!(json["summary"]["elapsed_ms"].is_u64());
    assert!(json.get("tree").is_none());
}

#[test]
fn test_json_tree() {
    let dir = TestDir::new();
    dir.add_file("sub/x.bin", 100);

    let (stdout, _stderr, success) = run_heft(dir.path(), &["--json", "--files"]);
    assert!(success);
    let json: Value = serde_json::from_str(&stdout).expect("valid JSON");
    let dirs = json["tree"].as_array().expect("tree is a list");
    assert_eq!(dirs.len(), 2);
    assert_eq!(dirs[0]["name"], ".");
    let sub = &dirs[1];
    assert_eq!(sub["name"], "sub");
    assert_eq!(sub["parent"], 0);
    assert_eq!(sub["size"], 100);
    assert_eq!(sub["files"][0]["name"], "x.bin");
}

#[test]
fn test_logs_go_to_stderr() {
    let dir = TestDir::new();
    dir.add_file("a.bin", 1);

    let (stdout, stderr, success) = run_heft(dir.path(), &["--json", "--log-level", "debug"]);
    assert!(success);
    assert!(serde_json::from_str::<Value>(&stdout).is_ok(), "{}", stdout);
    assert!(stderr.contains("scan finished"), "{}", stderr);
}

#[test]
fn test_silent_log_level() {
    let dir = TestDir::new();
    dir.add_file("a.bin", 1);

    let (_stdout, stderr, success) = run_heft(dir.path(), &["--log-level", "silent"]);
    assert!(success);
    assert!(stderr.is_empty(), "{}", stderr);
}
