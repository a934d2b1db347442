//! Data-directory layout and shared constants
//!
//! The on-disk layout mirrors the AppJail Director conventions:
//! `<data>/projects/<template>/` holds application templates and
//! `<data>/workspaces/<project>/` holds deployed instances. Both roots can
//! be overridden per invocation.

use crate::errors::{InternalError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Director composition file inside a template or workspace
pub const DIRECTOR_FILE: &str = "appjail-director.yml";

/// Environment file inside a template or workspace
pub const ENV_FILE: &str = ".env";

/// Template descriptor file
pub const INFO_FILE: &str = "info.json";

/// Sentinel marker: the last deploy completed successfully
pub const DONE_FILE: &str = ".done";

/// Sentinel marker: a deploy is currently running
pub const INPROGRESS_FILE: &str = ".progress";

/// External binaries that must be present on PATH at startup
pub const REQUIREMENTS: [&str; 2] = ["appjail", "appjail-director"];

static PROJECT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("static regex"));

/// Check whether a user-chosen project name is acceptable
pub fn is_valid_project_name(name: &str) -> bool {
    PROJECT_NAME_RE.is_match(name)
}

/// Resolved locations of the template and workspace roots
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory of application templates
    pub projects_dir: PathBuf,
    /// Root directory of deployed workspaces
    pub workspaces_dir: PathBuf,
}

impl Settings {
    /// Build settings from optional overrides, defaulting to
    /// `~/.turnkey/data/{projects,workspaces}`
    pub fn new(projects_dir: Option<PathBuf>, workspaces_dir: Option<PathBuf>) -> Result<Self> {
        let projects_dir = match projects_dir {
            Some(dir) => dir,
            None => default_data_dir()?.join("projects"),
        };
        let workspaces_dir = match workspaces_dir {
            Some(dir) => dir,
            None => default_data_dir()?.join("workspaces"),
        };

        Ok(Self {
            projects_dir,
            workspaces_dir,
        })
    }

    /// Directory of a named template
    pub fn template_dir(&self, template: &str) -> PathBuf {
        self.projects_dir.join(template)
    }

    /// Workspace directory of a named project
    pub fn workspace_dir(&self, project: &str) -> PathBuf {
        self.workspaces_dir.join(project)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let user_dirs = directories_next::UserDirs::new().ok_or(InternalError::Generic {
        message: "Could not determine home directory".to_string(),
    })?;
    Ok(user_dirs.home_dir().join(".turnkey").join("data"))
}

/// Path of the in-progress marker inside a workspace
pub fn in_progress_file(workspace: &Path) -> PathBuf {
    workspace.join(INPROGRESS_FILE)
}

/// Path of the done marker inside a workspace
pub fn done_file(workspace: &Path) -> PathBuf {
    workspace.join(DONE_FILE)
}
