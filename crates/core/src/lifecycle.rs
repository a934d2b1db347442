//! Project lifecycle control
//!
//! The state machine driving deploy / start / stop / destroy /
//! destroy-workspace. Deploys are guarded per project by the in-progress
//! marker: it is checked immediately before staging begins and cleared only
//! when the external deploy command returns, success or failure. The guard
//! is best-effort; a crashed deploy leaves a stale marker for manual
//! cleanup rather than risking two deploys corrupting one workspace.

use crate::director::{self, CheckStatus};
use crate::errors::{DeployError, Result};
use crate::exec::ProcOutput;
use crate::registry::{self, ProjectStatus};
use crate::settings::{done_file, in_progress_file, Settings};
use crate::workspace::{self, StagedFiles};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Exit code and captured output of a completed lifecycle action
#[derive(Debug, Clone)]
pub struct ActionReport {
    /// External command exit code
    pub code: i32,
    /// Captured console output
    pub output: String,
}

impl From<ProcOutput> for ActionReport {
    fn from(out: ProcOutput) -> Self {
        Self {
            code: out.code,
            output: out.output,
        }
    }
}

impl ActionReport {
    /// True when the external command exited with code 0
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Lifecycle controller for the configured template and workspace roots
#[derive(Debug, Clone)]
pub struct Lifecycle {
    settings: Settings,
}

impl Lifecycle {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Deploy a template as a named project
    ///
    /// Fails with [`DeployError::AlreadyRunning`] while another deploy of
    /// the same project is in flight, and with
    /// [`DeployError::AlreadyExists`] when the director record is complete
    /// and the done marker is present. An existing but incomplete record is
    /// torn down before staging. On success the captured deploy log is
    /// returned; on a non-zero exit the in-progress marker is removed and
    /// the captured output travels in [`DeployError::External`].
    #[instrument(level = "info", skip(self, files, template_dir))]
    pub async fn deploy(
        &self,
        template_dir: &Path,
        project: &str,
        files: &StagedFiles,
    ) -> Result<String> {
        if !crate::settings::is_valid_project_name(project) {
            return Err(DeployError::InvalidName {
                name: project.to_string(),
            }
            .into());
        }

        let workspace = self.settings.workspace_dir(project);

        // The per-project deploy guard
        if in_progress_file(&workspace).is_file() {
            return Err(DeployError::AlreadyRunning {
                project: project.to_string(),
            }
            .into());
        }

        match director::check(project).await? {
            CheckStatus::Exists if done_file(&workspace).is_file() => {
                return Err(DeployError::AlreadyExists {
                    project: project.to_string(),
                }
                .into());
            }
            CheckStatus::Absent => {}
            status => {
                // An existing but incomplete record: tear it down before
                // staging over it
                debug!("Tearing down stale record for {} ({:?})", project, status);
                director::destroy(project, &workspace).await?;
            }
        }

        workspace::stage(template_dir, &workspace, files)?;

        let out = director::up(project, &workspace).await?;

        if out.success() {
            workspace::promote(&workspace)?;
            info!("{}: Deployed", project);
            Ok(out.output)
        } else {
            workspace::clear_in_progress(&workspace)?;
            warn!("{}: Deploy failed with exit code {}", project, out.code);
            Err(DeployError::External {
                code: out.code,
                output: out.output,
            }
            .into())
        }
    }

    /// Start a deployed project (`director up`); no sentinel changes
    #[instrument(level = "info", skip(self))]
    pub async fn start(&self, project: &str) -> Result<ActionReport> {
        let workspace = self.settings.workspace_dir(project);
        let out = director::up(project, &workspace).await?;
        Ok(out.into())
    }

    /// Stop a running project (`director down`); no sentinel changes
    #[instrument(level = "info", skip(self))]
    pub async fn stop(&self, project: &str) -> Result<ActionReport> {
        let workspace = self.settings.workspace_dir(project);
        let out = director::down(project, &workspace).await?;
        Ok(out.into())
    }

    /// Tear down a project's director record, leaving the workspace on disk
    #[instrument(level = "info", skip(self))]
    pub async fn destroy(&self, project: &str) -> Result<ActionReport> {
        let workspace = self.settings.workspace_dir(project);
        let out = director::destroy(project, &workspace).await?;
        Ok(out.into())
    }

    /// Tear down a project and remove its workspace directory
    ///
    /// The directory is removed even when the external teardown fails; this
    /// is the only path back to the absent state.
    #[instrument(level = "info", skip(self))]
    pub async fn destroy_workspace(&self, project: &str) -> Result<ActionReport> {
        let workspace = self.settings.workspace_dir(project);
        let out = director::destroy(project, &workspace).await?;

        if !out.success() {
            warn!(
                "{}: Teardown exited with code {}; removing workspace anyway",
                project, out.code
            );
        }
        if workspace.is_dir() {
            fs::remove_dir_all(&workspace)?;
        }

        Ok(out.into())
    }

    /// Recompute the merged status view of all projects
    ///
    /// Callers re-query this after every action so status indicators
    /// reflect the new state; the refresh is advisory, not a correctness
    /// requirement of the controller.
    pub async fn refresh(&self) -> Result<BTreeMap<String, ProjectStatus>> {
        let ls_output = director::ls().await?;
        let projects = registry::reconcile(&self.settings.workspaces_dir, &ls_output)?;
        Ok(projects)
    }
}
