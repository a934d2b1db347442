//! Integration tests for start, stop, destroy, and rm

mod common;

use common::Sandbox;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_start_runs_up_in_workspace() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.workspace("web-server")).unwrap();
    sandbox.logging_stub("appjail-director", r#"echo "started"; exit 0"#);

    sandbox
        .turnkey()
        .args(["start", "web-server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("started"));

    let calls = sandbox.calls();
    assert!(calls.contains("up -p web-server"));
    // The status view is re-queried after the action
    assert!(calls.contains("ls"));
}

#[test]
fn test_stop_runs_down_in_workspace() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.workspace("web-server")).unwrap();
    sandbox.logging_stub("appjail-director", "exit 0");

    sandbox
        .turnkey()
        .args(["stop", "web-server"])
        .assert()
        .success();

    let calls = sandbox.calls();
    let calls: Vec<&str> = calls.lines().map(|l| l.trim()).collect();
    assert_eq!(calls, vec!["down -p web-server", "ls"]);
}

#[test]
fn test_start_failure_propagates_exit_status() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.workspace("web-server")).unwrap();
    sandbox.stub("appjail-director", r#"echo "no such project"; exit 1"#);

    sandbox
        .turnkey()
        .args(["start", "web-server"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("no such project"))
        .stderr(predicate::str::contains("Start failed with exit code 1"));
}

#[test]
fn test_destroy_keeps_workspace() {
    let sandbox = Sandbox::new();
    let workspace = sandbox.workspace("web-server");
    fs::create_dir_all(&workspace).unwrap();
    fs::write(workspace.join(".done"), "").unwrap();
    sandbox.logging_stub("appjail-director", "exit 0");

    sandbox
        .turnkey()
        .args(["destroy", "web-server"])
        .assert()
        .success();

    assert!(sandbox.calls().contains("down --ignore-failed -d -p web-server"));
    assert!(workspace.is_dir());
}

#[test]
fn test_destroy_without_workspace_directory() {
    let sandbox = Sandbox::new();
    sandbox.logging_stub("appjail-director", "exit 0");

    // No workspace was ever staged; teardown must still reach the CLI
    sandbox
        .turnkey()
        .args(["destroy", "ghost"])
        .assert()
        .success();

    assert!(sandbox.calls().contains("down --ignore-failed -d -p ghost"));
}

#[test]
fn test_rm_removes_workspace() {
    let sandbox = Sandbox::new();
    let workspace = sandbox.workspace("web-server");
    fs::create_dir_all(&workspace).unwrap();
    fs::write(workspace.join(".done"), "").unwrap();
    fs::create_dir_all(sandbox.workspace("other")).unwrap();
    sandbox.stub("appjail-director", "exit 0");

    sandbox
        .turnkey()
        .args(["rm", "web-server"])
        .assert()
        .success();

    assert!(!workspace.exists());
    // Unrelated workspaces are untouched
    assert!(sandbox.workspace("other").is_dir());
}

#[test]
fn test_rm_removes_workspace_even_when_teardown_fails() {
    let sandbox = Sandbox::new();
    let workspace = sandbox.workspace("web-server");
    fs::create_dir_all(&workspace).unwrap();
    sandbox.stub("appjail-director", r#"echo "teardown failed"; exit 1"#);

    sandbox
        .turnkey()
        .args(["rm", "web-server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("teardown failed"));

    assert!(!workspace.exists());
}

#[test]
fn test_rm_twice_does_not_fail() {
    let sandbox = Sandbox::new();
    let workspace = sandbox.workspace("web-server");
    fs::create_dir_all(&workspace).unwrap();
    sandbox.stub("appjail-director", "exit 0");

    sandbox.turnkey().args(["rm", "web-server"]).assert().success();
    sandbox.turnkey().args(["rm", "web-server"]).assert().success();

    assert!(!workspace.exists());
}
