//! End-to-end CLI tests against a temporary scriptoid home.

use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn scriptoids(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scriptoids").unwrap();
    cmd.env("SCRIPTOID_HOME", home);
    cmd
}

#[test]
fn new_link_unlink_round_trip() {
    let home = tempfile::tempdir().unwrap();

    scriptoids(home.path())
        .args(["new", "greet"])
        .assert()
        .success();
    assert!(home.path().join("greet/script_info.toml").is_file());
    assert!(home.path().join("greet/greet.sh").is_file());

    scriptoids(home.path())
        .args(["link", "greet"])
        .assert()
        .success();
    let link = home.path().join("bin/greet");
    assert!(link.symlink_metadata().unwrap().file_type().is_symlink());

    scriptoids(home.path())
        .args(["unlink", "greet"])
        .assert()
        .success();
    assert!(!link.exists());
    assert!(home.path().join("greet/greet.sh").is_file());
}

#[test]
fn link_unknown_scriptoid_fails() {
    let home = tempfile::tempdir().unwrap();
    scriptoids(home.path())
        .args(["link", "missing"])
        .assert()
        .failure();
}

#[test]
fn unlink_before_link_fails() {
    let home = tempfile::tempdir().unwrap();
    scriptoids(home.path())
        .args(["new", "greet"])
        .assert()
        .success();
    scriptoids(home.path())
        .args(["unlink", "greet"])
        .assert()
        .failure();
}

#[test]
fn new_rejects_unsafe_names() {
    let home = tempfile::tempdir().unwrap();
    scriptoids(home.path())
        .args(["new", "../escape"])
        .assert()
        .failure();
}

#[test]
fn list_reports_scriptoids() {
    let home = tempfile::tempdir().unwrap();
    scriptoids(home.path())
        .args(["new", "greet"])
        .assert()
        .success();

    let output = scriptoids(home.path()).arg("list").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("greet"));
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn show_prints_metadata() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("greet");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("script_info.toml"),
        "[scriptoid]\nname = \"greet\"\nversion = \"1.2.3\"\nentry_file = \"greet.sh\"\ndescription = \"says hello\"\n",
    )
    .unwrap();
    fs::write(dir.join("greet.sh"), "#!/bin/bash\n").unwrap();

    let output = scriptoids(home.path())
        .args(["show", "greet"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("1.2.3"));
    assert!(stdout.contains("says hello"));
}

#[test]
fn home_is_required() {
    let mut cmd = Command::cargo_bin("scriptoids").unwrap();
    cmd.env_remove("SCRIPTOID_HOME");
    cmd.arg("list").assert().failure();
}
