use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const BARE_SNAPSHOT: &str = r#"{
    "url": "https://bare.example.com",
    "technical": {"ssl": false, "robotsTxt": true, "sitemap": true, "mobileFriendly": true},
    "wordCount": 50
}"#;

#[test]
fn test_cli_help() {
    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    let assert = cmd.arg("--help").assert();

    assert
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_analyze_json_output() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    fs::write(&snapshot, BARE_SNAPSHOT).unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .args(["analyze", "--output", "json"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": 42"))
        .stdout(predicate::str::contains("Missing SSL certificate"));
}

#[test]
fn test_analyze_from_stdin_with_envelope() {
    let dir = tempdir().unwrap();
    let envelope = format!(r#"{{"websiteData": {}}}"#, BARE_SNAPSHOT);

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .args(["analyze", "-o", "json", "-"])
        .write_stdin(envelope)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"crawledUrls\""));
}

#[test]
fn test_analyze_saves_html() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    let output = dir.path().join("report.html");
    fs::write(&snapshot, BARE_SNAPSHOT).unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .args(["analyze", "-o", "json"])
        .arg(&snapshot)
        .arg("--save")
        .arg(&output)
        .assert()
        .success();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains(r#"<div class="score score-low">42</div>"#));
}

#[test]
fn test_analyze_invalid_snapshot_fails() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    fs::write(&snapshot, r#"{"images": {"total": 2}}"#).unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .arg("analyze")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid website snapshot"));
}

#[test]
fn test_analyze_missing_file_fails() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .args(["analyze", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_render_freeform_text() {
    let dir = tempdir().unwrap();
    let audit = dir.path().join("audit.txt");
    fs::write(
        &audit,
        "Overall Assessment\nDecent site.\nScore: 81/100\n## Technical SEO\n- Missing sitemap\n",
    )
    .unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .arg("render")
        .arg(&audit)
        .args(["--url", "https://decent.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<div class="score score-high">81</div>"#))
        .stdout(predicate::str::contains("Technical Issue"))
        .stdout(predicate::str::contains("decent.example.com"));
}

#[test]
fn test_config_file_sets_output() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    fs::write(&snapshot, BARE_SNAPSHOT).unwrap();
    fs::write(dir.path().join("auditly.toml"), "output = \"html\"\n").unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .arg("analyze")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("auditly");
    cmd.current_dir(dir.path())
        .args(["--config", "missing.yaml", "analyze", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
