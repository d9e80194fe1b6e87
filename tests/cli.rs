//! End-to-end tests for the loc-tree binary


use harness::{run_loc_tree, TestTree};

/// a.py       6 bytes, 1 line
/// notes.md   9 bytes, not counted
/// src/lib.py 22 bytes, 2 lines
fn sample_tree() -> TestTree {
    let tree = TestTree::new();
    tree.add_file("a.py", "x = 1\n");
    tree.add_file("notes.md", "# notes\n\n");
    tree.add_file("src/lib.py", "def f():\n    return 1\n");
    tree
}

// ============================================================================
// Output modes
// ============================================================================

#[test]
fn test_tree_mode_output() {
    let tree = sample_tree();

    let (stdout, stderr, success) = run_loc_tree(tree.path(), &["--mode", "tree"]);
    assert!(success, "loc-tree should succeed: {}", stderr);

    let expected = "\
. (root: 1 lines, ~2 tokens, 15 B; subdirs: 2 lines, ~6 tokens, 22 B; total: 3 lines, ~8 tokens, 37 B)
├── src (root: 2 lines, ~6 tokens, 22 B; subdirs: 0 lines, ~0 tokens, 0 B; total: 2 lines, ~6 tokens, 22 B)
│   └── lib.py (2 lines, ~6 tokens, 22 B)
├── a.py (1 lines, ~2 tokens, 6 B)
└── notes.md (0 lines, ~0 tokens, 9 B; excluded extension (.md))
";
    assert_eq!(stdout, expected);
    assert!(stderr.is_empty(), "nothing skipped, nothing reported: {}", stderr);
}

#[test]
fn test_ncdu_falls_back_to_tree_without_terminal() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_loc_tree(tree.path(), &[]);
    assert!(success);
    assert!(stdout.starts_with(". (root: "));
    assert!(stdout.contains("└── notes.md"));
}

#[test]
fn test_json_output() {
    let tree = sample_tree();

    let (stdout, stderr, success) = run_loc_tree(tree.path(), &["--json"]);
    assert!(success, "loc-tree --json should succeed: {}", stderr);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["is_dir"], true);
    assert_eq!(value["metrics"]["lines"], 3);
    assert_eq!(value["metrics"]["tokens"], 8);
    assert_eq!(value["root"]["size_bytes"], 15);
    assert_eq!(value["subdirs"]["lines"], 2);

    let children = value["children"].as_array().expect("children array");
    assert_eq!(children.len(), 3);
    assert_eq!(children[0]["path"], "src");
    assert_eq!(children[0]["children"][0]["path"], "src/lib.py");
    assert_eq!(children[2]["counted"], false);
}

#[test]
fn test_json_top_files() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_loc_tree(tree.path(), &["--json", "--top", "1"]);
    assert!(success);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let files = value.as_array().expect("flat array");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "lib.py");
}

#[test]
fn test_top_requires_json() {
    let tree = sample_tree();

    let (_stdout, _stderr, success) = run_loc_tree(tree.path(), &["--top", "1"]);
    assert!(!success);
}

// ============================================================================
// Scan options
// ============================================================================

#[test]
fn test_custom_extensions() {
    let tree = sample_tree();

    let (stdout, _stderr, success) =
        run_loc_tree(tree.path(), &["--mode", "tree", "--extensions", "md"]);
    assert!(success);
    assert!(stdout.contains("a.py (0 lines, ~0 tokens, 6 B; excluded extension (.py))"));
    assert!(stdout.contains("notes.md (1 lines, ~3 tokens, 9 B)"));
}

#[test]
fn test_include_blank_lines() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_loc_tree(
        tree.path(),
        &["--mode", "tree", "--extensions", ".md", "--include-blank-lines"],
    );
    assert!(success);
    assert!(stdout.contains("notes.md (2 lines, ~3 tokens, 9 B)"));
}

#[test]
fn test_exclude_dir() {
    let tree = sample_tree();

    let (stdout, _stderr, success) =
        run_loc_tree(tree.path(), &["--mode", "tree", "--exclude-dir", "src"]);
    assert!(success);
    assert!(!stdout.contains("src"));
    assert!(stdout.starts_with(". (root: 1 lines, ~2 tokens, 15 B; subdirs: 0 lines"));
}

#[test]
fn test_exclude_path_regex() {
    let tree = sample_tree();

    let (stdout, _stderr, success) =
        run_loc_tree(tree.path(), &["--mode", "tree", "--exclude-path-regex", r"lib\.py$"]);
    assert!(success);
    assert!(!stdout.contains("lib.py"));
    assert!(stdout.contains("├── src (root: 0 lines, ~0 tokens, 0 B;"));
}

#[test]
fn test_empty_dirs_kept_unless_pruned() {
    let tree = sample_tree();
    tree.add_dir("empty");

    let (stdout, _stderr, success) = run_loc_tree(tree.path(), &["--mode", "tree"]);
    assert!(success);
    assert!(stdout.contains("├── empty (root: 0 lines"));

    let (stdout, _stderr, success) =
        run_loc_tree(tree.path(), &["--mode", "tree", "--prune-empty"]);
    assert!(success);
    assert!(!stdout.contains("empty"));
}

#[test]
fn test_hidden_entries() {
    let tree = sample_tree();
    tree.add_file(".hidden/secret.py", "a\n");

    let (stdout, _stderr, success) = run_loc_tree(tree.path(), &["--mode", "tree"]);
    assert!(success);
    assert!(!stdout.contains(".hidden"));

    let (stdout, _stderr, success) =
        run_loc_tree(tree.path(), &["--mode", "tree", "--include-hidden"]);
    assert!(success);
    assert!(stdout.contains(".hidden"));
    assert!(stdout.contains("secret.py (1 lines, ~1 tokens, 2 B)"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_nonexistent_root_fails() {
    let tree = TestTree::new();
    let missing = tree.path().join("missing");

    let (stdout, stderr, success) = run_loc_tree(&missing, &["--mode", "tree"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("path not found"), "stderr: {}", stderr);
}

#[test]
fn test_file_root_fails() {
    let tree = sample_tree();

    let (_stdout, stderr, success) = run_loc_tree(&tree.path().join("a.py"), &["--mode", "tree"]);
    assert!(!success);
    assert!(stderr.contains("not a directory"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_regex_fails() {
    let tree = sample_tree();

    let (_stdout, stderr, success) =
        run_loc_tree(tree.path(), &["--mode", "tree", "--exclude-path-regex", "("]);
    assert!(!success);
    assert!(stderr.contains("invalid exclude regex"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_chars_per_token_fails() {
    let tree = sample_tree();

    let (_stdout, stderr, success) =
        run_loc_tree(tree.path(), &["--mode", "tree", "--chars-per-token", "0"]);
    assert!(!success);
    assert!(stderr.contains("chars per token"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_unreadable_dir_is_skipped_and_summarised() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let tree = sample_tree();
    let locked = tree.add_dir("locked");
    tree.add_file("locked/hidden.py", "a\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    // root ignores permission bits
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");
        return;
    }

    let (stdout, stderr, success) = run_loc_tree(tree.path(), &["--mode", "tree"]);
    let (_stdout, verbose_stderr, _) = run_loc_tree(tree.path(), &["--mode", "tree", "--verbose"]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");

    assert!(success);
    assert!(!stdout.contains("locked"));
    assert!(stdout.contains("total: 3 lines, ~8 tokens, 37 B"));
    assert!(stderr.contains("1 entries skipped (use --verbose for details)"), "stderr: {}", stderr);
    assert!(verbose_stderr.contains("warning: "), "stderr: {}", verbose_stderr);
    assert!(verbose_stderr.contains("locked"));
}
