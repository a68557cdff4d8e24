//! Integration tests for the titer binary.
//!
//! These tests verify end-to-end behavior including:
//! - Administration logging and deletion
//! - Profile switching and isolation
//! - Level projection output
//! - Data persistence across invocations

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("titer"))
}

/// First event id stored for a profile, read from the persisted mapping
fn first_event_id(data_dir: &Path, profile: &str) -> String {
    let raw = fs::read_to_string(data_dir.join("profile_data")).expect("Failed to read store");
    let data: serde_json::Value = serde_json::from_str(&raw).expect("Store is not valid JSON");
    data[profile][0]["id"]
        .as_str()
        .expect("Event has no id")
        .to_string()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Compound administration tracking",
        ));
}

#[test]
fn test_empty_log() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No administrations logged"));
}

#[test]
fn test_add_then_log_shows_entry() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("test-e")
        .arg("--dose")
        .arg("250")
        .arg("--at")
        .arg("2024-03-01T08:00:00Z")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dose logged"));

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Testosterone Enanthate"))
        .stdout(predicate::str::contains("250"));
}

#[test]
fn test_entries_persist_across_invocations() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("deca")
        .arg("--dose")
        .arg("200")
        .assert()
        .success();

    // A separate invocation reads fresh from disk
    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nandrolone Decanoate"));
}

#[test]
fn test_add_unknown_compound_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("no-such-compound")
        .arg("--dose")
        .arg("100")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown compound"));

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No administrations logged"));
}

#[test]
fn test_add_rejects_non_positive_dose() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("test-e")
        .arg("--dose")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dose"));
}

#[test]
fn test_add_rejects_unparseable_timestamp() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("test-e")
        .arg("--dose")
        .arg("100")
        .arg("--at")
        .arg("yesterday morning")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid timestamp"));
}

#[test]
fn test_delete_removes_entry() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("test-e")
        .arg("--dose")
        .arg("250")
        .assert()
        .success();

    let id = first_event_id(temp_dir.path(), "alex");

    cli()
        .arg("delete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry deleted"));

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No administrations logged"));
}

#[test]
fn test_delete_unknown_id_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("delete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("00000000-0000-0000-0000-000000000000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dose event"));
}

#[test]
fn test_profile_isolation() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("test-e")
        .arg("--dose")
        .arg("250")
        .assert()
        .success();

    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("griffin")
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to griffin's profile"));

    // griffin's log must not show alex's entry
    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No administrations logged"));
}

#[test]
fn test_switch_to_unknown_profile_fails_and_preserves_state() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("casey")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown profile"));

    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("alex"));
}

#[test]
fn test_profiles_marks_active() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("profiles")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("* alex"))
        .stdout(predicate::str::contains("  griffin"));
}

#[test]
fn test_levels_prints_curve_for_compound() {
    let temp_dir = setup_test_dir();

    let at = (chrono::Utc::now() - chrono::Duration::days(1)).to_rfc3339();
    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("test-e")
        .arg("--dose")
        .arg("250")
        .arg("--at")
        .arg(&at)
        .assert()
        .success();

    cli()
        .arg("levels")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--days-back")
        .arg("2")
        .arg("--days-forward")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Testosterone Enanthate"))
        .stdout(predicate::str::contains("half-life 4.5 days"));
}

#[test]
fn test_levels_unknown_compound_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("levels")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("no-such")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown compound"));
}

#[test]
fn test_levels_with_no_entries() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("levels")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to project"));
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    let out = temp_dir.path().join("export.csv");

    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--compound")
        .arg("test-e")
        .arg("--dose")
        .arg("250")
        .assert()
        .success();

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));

    let contents = fs::read_to_string(&out).expect("Failed to read export");
    assert!(contents.starts_with("taken_at,compound,name,dose_mg"));
    assert!(contents.contains("Testosterone Enanthate"));
}
