//! CLI contract tests.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;

fn bin() -> Command {
    Command::cargo_bin("audit-sieve").expect("binary built")
}

fn write_log(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("audit.log");
    let mut file = std::fs::File::create(&path).expect("create log");
    file.write_all(contents.as_bytes()).expect("write log");
    path
}

#[test]
fn no_selection_shows_usage_and_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_log(&dir, "{}\n");

    let output = bin().arg(&path).output().expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn missing_file_is_fatal() {
    let output = bin()
        .args(["--secrets-get", "/nonexistent/audit.log"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open audit log"));
}

#[test]
fn filters_secrets_get_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_log(
        &dir,
        concat!(
            "{\"verb\":\"get\",\"objectRef\":{\"resource\":\"secrets\"}}\n",
            "{\"verb\":\"list\",\"objectRef\":{\"resource\":\"pods\"}}\n",
        ),
    );

    bin()
        .arg(&path)
        .arg("--secrets-get")
        .assert()
        .success()
        .stdout("{\"verb\":\"get\",\"objectRef\":{\"resource\":\"secrets\"}}\n");
}

#[test]
fn grep_raw_prints_matching_lines_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_log(&dir, "no match here\nsaw audit-Policy event\n");

    bin()
        .arg(&path)
        .args(["--grep", "AUDIT-POLICY", "--raw"])
        .assert()
        .success()
        .stdout("saw audit-Policy event\n");
}

#[test]
fn multiple_rule_flags_select_any_match() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_log(
        &dir,
        concat!(
            "{\"verb\":\"create\",\"objectRef\":{\"subresource\":\"exec\"}}\n",
            "{\"verb\":\"watch\"}\n",
        ),
    );

    bin()
        .arg(&path)
        .args(["--secrets-get", "--create-exec"])
        .assert()
        .success()
        .stdout("{\"verb\":\"create\",\"objectRef\":{\"subresource\":\"exec\"}}\n");
}
