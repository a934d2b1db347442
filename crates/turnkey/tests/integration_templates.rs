//! Integration tests for template management commands

mod common;

use common::Sandbox;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_templates_list_skips_malformed_entries() {
    let sandbox = Sandbox::new();
    sandbox.write_template(
        "web-server",
        r#"{"name": "Web Server", "description": "nginx in a jail"}"#,
    );
    sandbox.write_template("broken", "{ not json at all");

    // Missing director file
    let incomplete = sandbox.projects_dir().join("incomplete");
    fs::create_dir_all(&incomplete).unwrap();
    fs::write(incomplete.join("info.json"), "{}").unwrap();

    sandbox
        .turnkey()
        .args(["templates", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Web Server: nginx in a jail"))
        .stdout(predicate::str::contains("broken").not())
        .stdout(predicate::str::contains("incomplete").not());
}

#[test]
fn test_templates_list_json() {
    let sandbox = Sandbox::new();
    sandbox.write_template("web-server", r#"{"description": "nginx"}"#);

    let output = sandbox
        .turnkey()
        .args(["templates", "list", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed[0]["name"], "web-server");
    assert_eq!(parsed[0]["description"], "nginx");
}

#[test]
fn test_templates_list_accepts_descriptor_comments() {
    let sandbox = Sandbox::new();
    sandbox.write_template(
        "web-server",
        "{\n  // display name\n  \"name\": \"Web Server\"\n}",
    );

    sandbox
        .turnkey()
        .args(["templates", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Web Server"));
}

#[test]
fn test_templates_rm_by_display_name() {
    let sandbox = Sandbox::new();
    let dir = sandbox.write_template("web-server", r#"{"name": "Web Server"}"#);
    sandbox.write_template("keep", "{}");

    sandbox
        .turnkey()
        .args(["templates", "rm", "Web Server"])
        .assert()
        .success();

    assert!(!dir.exists());
    assert!(sandbox.projects_dir().join("keep").is_dir());
}

#[test]
fn test_templates_save_writes_back_contents() {
    let sandbox = Sandbox::new();
    let dir = sandbox.write_template(
        "web-server",
        r#"{"extra-files": {"nginx": {"filename": "nginx.conf"}}}"#,
    );
    fs::write(dir.join("nginx.conf"), "server {}\n").unwrap();

    let edited = sandbox.path().join("edited.yml");
    fs::write(&edited, "options:\n  edited: true\n").unwrap();

    sandbox
        .turnkey()
        .args(["templates", "save", "web-server"])
        .arg("--director-file")
        .arg(&edited)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.join("appjail-director.yml")).unwrap(),
        "options:\n  edited: true\n"
    );
    // Saving never creates sentinels
    assert!(!dir.join(".progress").exists());
    assert!(!dir.join(".done").exists());
}
