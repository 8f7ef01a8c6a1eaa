//! Binary-level CLI checks
//!
//! These only exercise argument handling; the server itself is covered by
//! the router tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn version_flag_prints_version() {
    Command::cargo_bin("pkgpulse")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pkgpulse"));
}

#[test]
fn help_flag_describes_the_server() {
    Command::cargo_bin("pkgpulse")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Package dependency health monitor"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--concurrency"));
}

#[test]
fn zero_concurrency_is_rejected() {
    Command::cargo_bin("pkgpulse")
        .unwrap()
        .args(["--concurrency", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("concurrency must be at least 1"));
}

#[test]
fn out_of_range_timeout_is_rejected() {
    Command::cargo_bin("pkgpulse")
        .unwrap()
        .args(["--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout must be between"));
}

#[test]
fn unknown_flag_is_rejected() {
    Command::cargo_bin("pkgpulse")
        .unwrap()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure();
}
