//! AppJail Director CLI wrappers
//!
//! Thin argument-vector wrappers over `appjail-director`. Exit codes are
//! returned for inspection; only invocation failures (binary missing,
//! unparseable structured output) are errors.

use crate::errors::{DirectorError, Result};
use crate::exec::{self, ProcOutput, StderrMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// sysexits EX_NOINPUT: the director CLI has no record of the project
pub const EX_NOINPUT: i32 = 66;

/// Result of `director check -p <project>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Exit 0: the project exists and its record is complete
    Exists,
    /// Exit EX_NOINPUT: the project is unknown to the director CLI
    Absent,
    /// Any other exit: a record exists but is incomplete or damaged
    Broken(i32),
}

impl CheckStatus {
    /// Map a `director check` exit code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Exists,
            EX_NOINPUT => Self::Absent,
            other => Self::Broken(other),
        }
    }
}

/// Structured project info from `director describe`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDescription {
    /// Directory holding the most recent captured console output
    pub last_log: PathBuf,
}

/// Check whether the director CLI has a complete record of a project
#[instrument(level = "debug")]
pub async fn check(project: &str) -> Result<CheckStatus> {
    let out = exec::run(
        exec::argv(&["appjail-director", "check", "-p", project]),
        None,
        StderrMode::Merge,
    )
    .await?;
    let status = CheckStatus::from_code(out.code);
    debug!("Check for {} reported {:?}", project, status);
    Ok(status)
}

/// Describe a project; stdout is JSON including the `last_log` path
#[instrument(level = "debug")]
pub async fn describe(project: &str) -> Result<ProjectDescription> {
    let out = exec::run(
        exec::argv(&["appjail-director", "describe", "-p", project]),
        None,
        StderrMode::Discard,
    )
    .await?;
    if !out.success() {
        return Err(DirectorError::CLIError(format!(
            "describe for {} failed with exit code {}",
            project, out.code
        ))
        .into());
    }
    let description = serde_json::from_str(&out.output).map_err(|e| DirectorError::Parsing {
        message: e.to_string(),
    })?;
    Ok(description)
}

/// List tracked projects; returns raw `ls` output for the registry to parse
#[instrument(level = "debug")]
pub async fn ls() -> Result<String> {
    let out = exec::run(
        exec::argv(&["appjail-director", "ls"]),
        None,
        StderrMode::Discard,
    )
    .await?;
    Ok(out.output)
}

/// Deploy a project (`director up`), run from inside its workspace
#[instrument(level = "debug", skip(workspace))]
pub async fn up(project: &str, workspace: &Path) -> Result<ProcOutput> {
    let out = exec::run(
        exec::argv(&["appjail-director", "up", "-p", project]),
        workspace_cwd(workspace),
        StderrMode::Merge,
    )
    .await?;
    Ok(out)
}

/// Stop a project (`director down`), run from inside its workspace
#[instrument(level = "debug", skip(workspace))]
pub async fn down(project: &str, workspace: &Path) -> Result<ProcOutput> {
    let out = exec::run(
        exec::argv(&["appjail-director", "down", "-p", project]),
        workspace_cwd(workspace),
        StderrMode::Merge,
    )
    .await?;
    Ok(out)
}

/// Forced teardown of a project's director record
///
/// The workspace directory itself is left on disk.
#[instrument(level = "debug", skip(workspace))]
pub async fn destroy(project: &str, workspace: &Path) -> Result<ProcOutput> {
    let out = exec::run(
        exec::argv(&[
            "appjail-director",
            "down",
            "--ignore-failed",
            "-d",
            "-p",
            project,
        ]),
        workspace_cwd(workspace),
        StderrMode::Merge,
    )
    .await?;
    Ok(out)
}

/// Use the workspace as cwd only when it exists; teardown of a project
/// whose workspace was never staged (or is already removed) must not fail
/// on the spawn
fn workspace_cwd(workspace: &Path) -> Option<PathBuf> {
    workspace.is_dir().then(|| workspace.to_path_buf())
}
