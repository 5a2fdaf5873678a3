use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::path::Path;
use std::process::Command;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

const FULL_SNAPSHOT: &str = r#"{
  "repository": "octo/full",
  "fetched_at": "2024-05-01T12:00:00Z",
  "statistics": {"total_contributors": 3},
  "contributors": [
    {"author": {"login": "x", "avatar_url": "https://avatars.example/x", "html_url": "https://github.com/x"},
     "total_commits": 10,
     "weeks": [{"w": 1, "a": 100, "d": 20, "c": 6, "additions": 100, "deletions": 20},
               {"w": 2, "a": 5, "d": 0, "c": 4, "additions": 5, "deletions": 0}]},
    {"author": {"login": "y"}, "total_commits": 25, "weeks": [{"additions": 1, "deletions": 1000}]},
    {"author": {"login": "z"}, "total_commits": 10, "weeks": []}
  ]
}"#;

const SUMMARY_SNAPSHOT: &str = r#"{
  "repository": "octo/summary",
  "contributors": [
    {"author": {"login": "s"}, "total_commits": 3, "total_additions": 30, "total_deletions": 3}
  ]
}"#;

fn write_snapshot(dir: &Path, name: &str, content: &str, age_secs: u64) {
    fs::write(dir.join(name), content).unwrap();
    let file = File::options().write(true).open(dir.join(name)).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(age_secs)).unwrap();
}

fn summary_json(dir: &Path, extra: &[&str]) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("contribviz").unwrap();
    cmd.current_dir(dir).args(extra).args(["summary", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn summary_json_ranks_and_totals() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "contributors-2024-05-01.json", FULL_SNAPSHOT, 0);

    let v = summary_json(dir.path(), &[]);
    assert_eq!(v["repository"], "octo/full");
    assert_eq!(v["total_contributors"], 3);
    assert_eq!(v["total_commits"], 45);
    assert_eq!(v["total_additions"], 106);
    assert_eq!(v["total_deletions"], 1020);
    assert_eq!(v["net_lines"], -914);

    let names: Vec<&str> = v["contributors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["y", "x", "z"]);

    let x = &v["contributors"][1];
    assert_eq!(x["commits"], 10);
    assert_eq!(x["additions"], 105);
    assert_eq!(x["deletions"], 20);
    assert_eq!(x["net_lines"], 85);
    assert_eq!(x["profile_url"], "https://github.com/x");
}

#[test]
fn full_file_preferred_over_newer_summary() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "contributors-2024-05-01.json", FULL_SNAPSHOT, 3600);
    write_snapshot(dir.path(), "contributors-summary-2024-05-02.json", SUMMARY_SNAPSHOT, 0);

    assert_eq!(summary_json(dir.path(), &[])["repository"], "octo/full");
}

#[test]
fn summary_file_used_when_no_full_file() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "contributors-summary-2024-05-02.json", SUMMARY_SNAPSHOT, 0);

    let v = summary_json(dir.path(), &[]);
    assert_eq!(v["repository"], "octo/summary");
    assert_eq!(v["contributors"][0]["additions"], 30);
    assert_eq!(v["contributors"][0]["net_lines"], 27);
}

#[test]
fn data_dir_and_repository_flags() {
    let data = tempdir().unwrap();
    let cwd = tempdir().unwrap();
    write_snapshot(data.path(), "contributors-x.json", r#"{"contributors": []}"#, 0);

    let data_dir = data.path().to_str().unwrap();
    let v = summary_json(cwd.path(), &["--data-dir", data_dir, "--repository", "me/mine"]);
    assert_eq!(v["repository"], "me/mine");
    assert_eq!(v["total_contributors"], 0);
    assert_eq!(v["total_commits"], 0);
    assert_eq!(v["contributors"].as_array().map(Vec::len), Some(0));
}

#[test]
fn missing_data_fails_without_writing_images() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("contribviz").unwrap();
    cmd.current_dir(dir.path()).arg("charts");
    let out = cmd.assert().failure().get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&out);
    assert!(stdout.contains("No contributor data files found"), "{stdout}");
    assert!(!dir.path().join("images").exists());
}

#[test]
fn malformed_data_fails_without_writing_images() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "contributors-bad.json", r#"{"contributors": [{"total_commits": 1}]}"#, 0);

    let mut cmd = Command::cargo_bin("contribviz").unwrap();
    cmd.current_dir(dir.path()).arg("html");
    let out = cmd.assert().failure().get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&out);
    assert!(stdout.contains("Invalid contributor data"), "{stdout}");
    assert!(!dir.path().join("images").exists());
}

#[test]
fn charts_writes_both_images() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "contributors-2024.json", FULL_SNAPSHOT, 0);

    let mut cmd = Command::cargo_bin("contribviz").unwrap();
    cmd.current_dir(dir.path()).args(["--output-dir", "out", "charts"]);
    cmd.assert().success();

    for name in ["top3-contributors.png", "complete-ranking.png"] {
        let png = dir.path().join("out").join(name);
        assert!(fs::metadata(&png).map(|m| m.len() > 0).unwrap_or(false), "{} missing", png.display());
    }
}
