//! Shared test harness: a sandbox with stub AppJail CLIs on PATH
//!
//! The real `appjail` and `appjail-director` binaries only exist on
//! FreeBSD, so integration tests drive the CLI against small shell-script
//! stubs. Each test writes the stub behavior it needs; stubs can append
//! their argv to a call log for ordering assertions.

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct Sandbox {
    temp: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create sandbox");
        fs::create_dir_all(temp.path().join("bin")).expect("create bin dir");
        fs::create_dir_all(temp.path().join("projects")).expect("create projects dir");
        fs::create_dir_all(temp.path().join("workspaces")).expect("create workspaces dir");
        let sandbox = Self { temp };
        // Both binaries must resolve for preflight; tests overwrite these
        // defaults with real behavior as needed
        sandbox.stub("appjail", "exit 0");
        sandbox.stub("appjail-director", "exit 0");
        sandbox
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp.path()
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.temp.path().join("bin")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.temp.path().join("projects")
    }

    pub fn workspaces_dir(&self) -> PathBuf {
        self.temp.path().join("workspaces")
    }

    pub fn workspace(&self, project: &str) -> PathBuf {
        self.workspaces_dir().join(project)
    }

    pub fn calls_log(&self) -> PathBuf {
        self.temp.path().join("calls.log")
    }

    /// Read the call log; empty when no stub ran
    pub fn calls(&self) -> String {
        fs::read_to_string(self.calls_log()).unwrap_or_default()
    }

    /// Install a stub executable on the sandbox PATH
    pub fn stub(&self, name: &str, body: &str) {
        let path = self.bin_dir().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write stub");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
        }
    }

    /// Install a stub that appends its argv to the call log first
    pub fn logging_stub(&self, name: &str, body: &str) {
        self.stub(
            name,
            &format!("echo \"$@\" >> \"{}\"\n{}", self.calls_log().display(), body),
        );
    }

    /// Create a template directory with a descriptor and director file
    pub fn write_template(&self, dir_name: &str, info: &str) -> PathBuf {
        let dir = self.projects_dir().join(dir_name);
        fs::create_dir_all(&dir).expect("create template dir");
        fs::write(dir.join("info.json"), info).expect("write info.json");
        fs::write(dir.join("appjail-director.yml"), "options:\n  virtualnet: true\n")
            .expect("write director file");
        dir
    }

    /// Build a turnkey command wired to the sandbox PATH and data roots
    pub fn turnkey(&self) -> Command {
        let mut cmd = Command::cargo_bin("turnkey").expect("binary exists");
        let path = std::env::var("PATH").unwrap_or_default();
        cmd.env("PATH", format!("{}:{}", self.bin_dir().display(), path));
        cmd.arg("--projects-dir").arg(self.projects_dir());
        cmd.arg("--workspaces-dir").arg(self.workspaces_dir());
        cmd
    }
}
