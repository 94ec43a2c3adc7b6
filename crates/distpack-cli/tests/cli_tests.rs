//! End-to-end CLI tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn distpack() -> Command {
    Command::cargo_bin("distpack").expect("binary exists")
}

fn entry_names(archive: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn exports_project_with_ignore_rules() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("keep.rs"), "fn main() {}").unwrap();
    fs::write(root.join(".gitignore"), "*.log\n").unwrap();
    fs::write(root.join("noise.log"), "x").unwrap();

    distpack()
        .arg(root)
        .arg("--output-dir")
        .arg(root.join("dist"))
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("export.zip"));

    let mut names = entry_names(&root.join("dist/export.zip"));
    names.sort_unstable();
    assert_eq!(names, vec![".gitignore", "keep.rs"]);
}

#[test]
fn redact_flag_strips_marked_regions() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("task.rs"), "fn f() {}\n//[[ let answer = 42; //]]\n").unwrap();

    distpack()
        .arg(root)
        .arg("--output-dir")
        .arg(root.join("dist"))
        .arg("--redact")
        .assert()
        .success();

    let mut zip =
        zip::ZipArchive::new(File::open(root.join("dist/export.zip")).unwrap()).unwrap();
    let mut body = String::new();
    zip.by_name("task.rs")
        .unwrap()
        .read_to_string(&mut body)
        .unwrap();
    assert!(!body.contains("answer"));
    assert!(body.contains("fn f() {}"));
}

#[test]
fn json_output_describes_the_run() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.txt"), "a").unwrap();

    let assert = distpack()
        .arg(root)
        .arg("--output-dir")
        .arg(root.join("dist"))
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["files_added"], 1);
    assert_eq!(report["files_redacted"], 0);
    assert!(report["archive"].as_str().unwrap().ends_with("export.zip"));
}

#[test]
fn custom_archive_name() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.txt"), "a").unwrap();

    distpack()
        .arg(root)
        .arg("--output-dir")
        .arg(root.join("out"))
        .arg("--archive-name")
        .arg("handout.zip")
        .assert()
        .success();

    assert!(root.join("out/handout.zip").is_file());
}

#[test]
fn missing_base_dir_fails_with_message() {
    let temp = TempDir::new().unwrap();

    distpack()
        .arg(temp.path().join("nope"))
        .arg("--output-dir")
        .arg(temp.path().join("dist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("base directory does not exist"));
}

#[test]
fn quiet_suppresses_success_line() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.txt"), "a").unwrap();

    distpack()
        .arg(root)
        .arg("--output-dir")
        .arg(root.join("dist"))
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn invalid_compression_level_rejected() {
    distpack().arg("-l").arg("12").assert().failure();
}
