//! Integration tests for the logs command

mod common;

use common::Sandbox;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_logs_prints_latest_run() {
    let sandbox = Sandbox::new();

    let run_dir = sandbox.path().join("logs/2024-06-01_12:00:00");
    fs::create_dir_all(&run_dir).unwrap();
    fs::write(run_dir.join("web.log"), "jail web started\n").unwrap();
    fs::write(run_dir.join("db.log"), "jail db started\n").unwrap();

    sandbox.stub(
        "appjail-director",
        &format!(
            r#"case "$1" in
check) exit 0 ;;
describe) printf '{{"name": "web-server", "last_log": "%s"}}\n' "{run}" ;;
esac
exit 0"#,
            run = run_dir.display(),
        ),
    );

    sandbox
        .turnkey()
        .args(["logs", "web-server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("==> 2024-06-01_12:00:00/db.log <=="))
        .stdout(predicate::str::contains("jail db started"))
        .stdout(predicate::str::contains("==> 2024-06-01_12:00:00/web.log <=="))
        .stdout(predicate::str::contains("jail web started"));
}

#[test]
fn test_logs_unknown_project() {
    let sandbox = Sandbox::new();
    sandbox.stub(
        "appjail-director",
        r#"if [ "$1" = "check" ]; then exit 66; fi
exit 0"#,
    );

    sandbox
        .turnkey()
        .args(["logs", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such project: ghost"));
}

#[test]
fn test_logs_unparseable_describe_output() {
    let sandbox = Sandbox::new();
    sandbox.stub(
        "appjail-director",
        r#"case "$1" in
check) exit 0 ;;
describe) echo "not json" ;;
esac
exit 0"#,
    );

    sandbox
        .turnkey()
        .args(["logs", "web-server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse director output"));
}
