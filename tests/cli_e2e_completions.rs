//! End-to-end tests for the `datacatalog-custom-entries completions` command.
//!
//! These tests verify the CLI behavior of the `completions` command by invoking
//! the binary directly and checking its output.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("datacatalog-custom-entries");
    cmd.arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completion scripts"))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("powershell"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("datacatalog-custom-entries");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_datacatalog-custom-entries()"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("--csv-file"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("datacatalog-custom-entries");
    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef datacatalog-custom-entries"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn test_completions_fish() {
    let mut cmd = cargo_bin_cmd!("datacatalog-custom-entries");
    cmd.arg("completions")
        .arg("fish")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c datacatalog-custom-entries"))
        .stdout(predicate::str::contains("json-file"));
}

#[test]
fn test_completions_powershell() {
    let mut cmd = cargo_bin_cmd!("datacatalog-custom-entries");
    cmd.arg("completions")
        .arg("powershell")
        .assert()
        .success()
        .stdout(predicate::str::contains("Register-ArgumentCompleter"));
}

#[test]
fn test_completions_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("datacatalog-custom-entries");
    cmd.arg("completions")
        .arg("invalid-shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
