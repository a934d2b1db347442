//! Shared helpers for commands that accept edited file contents

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};
use turnkey_core::lifecycle::Lifecycle;
use turnkey_core::workspace::StagedFiles;

/// Re-query the merged status view after a completed action
///
/// Advisory only: the action has already succeeded, so a failed refresh is
/// logged and swallowed.
pub async fn refresh_status(lifecycle: &Lifecycle, project: &str) {
    match lifecycle.refresh().await {
        Ok(projects) => {
            let status = projects
                .get(project)
                .map(|s| s.as_str())
                .unwrap_or("absent");
            debug!("{}: Status now {}", project, status);
        }
        Err(e) => warn!("{}: Status refresh failed: {}", project, e),
    }
}

/// File-content overrides supplied on the command line
///
/// Each override is read from a local path and replaces the corresponding
/// template default before staging or saving.
#[derive(Debug, Clone, Default)]
pub struct FileOverrides {
    /// Replacement director composition file
    pub director_file: Option<PathBuf>,
    /// Replacement environment file
    pub env_file: Option<PathBuf>,
    /// Extra file overrides in NAME=PATH form
    pub extras: Vec<String>,
}

impl FileOverrides {
    /// Apply the overrides on top of loaded template contents
    pub fn apply(&self, staged: &mut StagedFiles) -> Result<()> {
        if let Some(path) = &self.director_file {
            staged.director = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        if let Some(path) = &self.env_file {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            staged.env = Some(content);
        }
        for extra in &self.extras {
            let (name, path) = extra
                .split_once('=')
                .with_context(|| format!("Invalid extra override '{}' (expected NAME=PATH)", extra))?;
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            staged.extras.insert(name.to_string(), content);
        }
        Ok(())
    }
}
