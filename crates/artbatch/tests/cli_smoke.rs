use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_displays_usage() {
    Command::cargo_bin("artbatch")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn completions_are_generated() {
    Command::cargo_bin("artbatch")
        .expect("binary exists")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("artbatch"));
}

#[test]
fn rejects_unknown_format() {
    Command::cargo_bin("artbatch")
        .expect("binary exists")
        .args(["export", "--format", "tiff", "a.ai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
