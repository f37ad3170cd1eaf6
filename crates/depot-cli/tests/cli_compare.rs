use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn depot_cmd() -> Command {
    Command::cargo_bin("depot").unwrap()
}

#[test]
fn test_compare_numeric_parts() {
    depot_cmd()
        .args(["compare", "1.9", "1.10"])
        .assert()
        .success()
        .stdout("1.9 < 1.10\n");
}

#[test]
fn test_compare_qualifiers() {
    depot_cmd()
        .args(["compare", "1.0-rc1", "1.0-alpha-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0-rc1 > 1.0-alpha-2"));
}

#[test]
fn test_compare_equal_ignores_case() {
    depot_cmd()
        .args(["compare", "1.0-RC1", "1.0-rc1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("="));
}

#[test]
fn test_compare_requires_two_versions() {
    depot_cmd().args(["compare", "1.0"]).assert().failure();
}
