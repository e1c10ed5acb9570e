mod common;

use common::Vault;
use predicates::prelude::*;
use std::fs;

#[test]
fn settings_shows_defaults_without_writing() {
    let vault = Vault::new();

    vault
        .cmd()
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("autoUpdateEnabled: false"))
        .stdout(predicate::str::contains("fieldName: last-updated"))
        .stdout(predicate::str::contains("dateFormat: YYYY-MM-DD HH:mm:ss"))
        .stdout(predicate::str::contains("enabledByDefault: true"));

    assert!(!vault.settings_file().exists());
}

#[test]
fn settings_changes_are_saved() {
    let vault = Vault::new();

    vault
        .cmd()
        .args([
            "settings",
            "--auto-update",
            "true",
            "--field-name",
            "updated",
            "--date-format",
            "ISO",
            "--enabled-by-default",
            "false",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldName: updated"));

    let saved = fs::read_to_string(vault.settings_file()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["autoUpdateEnabled"], true);
    assert_eq!(json["fieldName"], "updated");
    assert_eq!(json["dateFormat"], "ISO");
    assert_eq!(json["enabledByDefault"], false);
}

#[test]
fn settings_json_output() {
    let vault = Vault::new();

    let out = vault.cmd().args(["settings", "--json"]).output().unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["dateFormat"], "YYYY-MM-DD HH:mm:ss");
}

#[test]
fn blank_field_name_restores_default() {
    let vault = Vault::new();

    vault.cmd().args(["settings", "--field-name", "custom"]).assert().success();
    vault
        .cmd()
        .args(["settings", "--field-name", " "])
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldName: last-updated"));
}

#[test]
fn unknown_date_format_is_rejected() {
    let vault = Vault::new();

    vault.cmd().args(["settings", "--date-format", "DD/MM/YYYY"]).assert().failure();
}
