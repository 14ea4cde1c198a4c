//! End-to-end tests for the `flag-cache` binary.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn flag_cache(cache_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flag-cache").expect("binary builds");
    cmd.env("LD_CACHE_DIR", cache_dir.path())
        .env_remove("XDG_CACHE_HOME")
        .env_remove("FLAG_CACHE_LOG");
    cmd
}

#[test]
fn test_set_then_get() {
    let dir = TempDir::new().unwrap();

    flag_cache(&dir)
        .args(["set", "flags", "my-boolean-flag", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored flags/my-boolean-flag"));

    flag_cache(&dir)
        .args(["get", "flags", "my-boolean-flag"])
        .assert()
        .success()
        .stdout("true");

    assert!(dir.path().join("example-launchdarkly-cache.db").is_file());
}

#[test]
fn test_get_missing_fails() {
    let dir = TempDir::new().unwrap();

    flag_cache(&dir)
        .args(["get", "flags", "absent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry not found: flags/absent"));
}

#[test]
fn test_file_backend_reads_stdin() {
    let dir = TempDir::new().unwrap();

    flag_cache(&dir)
        .args(["--backend", "file", "set", "flags", "payload"])
        .write_stdin("{\"version\":3}")
        .assert()
        .success();

    let entry = dir
        .path()
        .join("example-launchdarkly-cache")
        .join("flags-payload.data");
    assert_eq!(
        std::fs::read_to_string(entry).unwrap(),
        "{\"version\":3}"
    );

    flag_cache(&dir)
        .args(["--backend", "file", "rm", "flags", "payload"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed flags/payload"));

    flag_cache(&dir)
        .args(["--backend", "file", "get", "flags", "payload"])
        .assert()
        .failure();
}

#[test]
fn test_path_honors_override() {
    let dir = TempDir::new().unwrap();

    flag_cache(&dir)
        .args(["--name", "mobile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite: "))
        .stdout(predicate::str::contains("mobile.db"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();

    flag_cache(&dir)
        .args(["--format", "json", "set", "flags", "k", "v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"action\": \"set\""));

    flag_cache(&dir)
        .args(["--format", "json", "get", "flags", "k"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"v\""));

    flag_cache(&dir)
        .args(["--format", "json", "get", "flags", "missing"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\": \"not_found\""));
}

#[test]
fn test_empty_cache_home_selects_vendor_dir() {
    let dir = TempDir::new().unwrap();

    flag_cache(&dir)
        .env_remove("LD_CACHE_DIR")
        .env("XDG_CACHE_HOME", "")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("launchdarkly"))
        .stdout(predicate::str::contains("example-launchdarkly-cache.db"));
}

#[test]
fn test_cache_home_value_is_ignored() {
    let dir = TempDir::new().unwrap();
    let home = dir.path().join("home-cache");

    flag_cache(&dir)
        .env_remove("LD_CACHE_DIR")
        .env("XDG_CACHE_HOME", &home)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("launchdarkly"))
        .stdout(predicate::str::contains("home-cache").not());
}

#[test]
fn test_empty_cache_dir_is_unset() {
    let dir = TempDir::new().unwrap();

    flag_cache(&dir)
        .env("LD_CACHE_DIR", "")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("example-launchdarkly-cache.db"))
        .stdout(predicate::str::contains("launchdarkly/").not());
}
