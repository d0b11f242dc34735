//! Binary-level checks for the `logtomb` executable.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_every_subcommand() {
    Command::cargo_bin("logtomb")
        .expect("binary builds")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("monitor"))
        .stdout(predicate::str::contains("service"))
        .stdout(predicate::str::contains("deploy"));
}

#[test]
fn version_flag_succeeds() {
    Command::cargo_bin("logtomb")
        .expect("binary builds")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("logtomb"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    Command::cargo_bin("logtomb")
        .expect("binary builds")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn malformed_filter_pattern_is_fatal_at_startup() {
    Command::cargo_bin("logtomb")
        .expect("binary builds")
        .args(["monitor", "--include-log", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to compile filter pattern"));
}

#[test]
fn monitor_fails_fast_when_the_log_dir_does_not_exist() {
    let scratch = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("logtomb")
        .expect("binary builds")
        .args([
            "monitor",
            "--log-dir",
            scratch.path().join("absent").to_str().expect("utf8 path"),
            "--tombstone-dir",
            scratch.path().join("tombs").to_str().expect("utf8 path"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to watch"));
}
