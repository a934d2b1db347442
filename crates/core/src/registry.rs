//! Project status reconciliation
//!
//! Merges two sources of truth into one status mapping: the workspace
//! directories on disk (source of truth for existence) and the director
//! CLI's `ls` report (source of truth for completion/failure). The merge is
//! recomputed on every refresh; it is never cached.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// External status of a tracked project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    /// `+`: the last deploy completed
    Done,
    /// `-`: the last deploy failed
    Failed,
    /// `!`: a deploy never ran to completion
    Unfinished,
    /// `x`: the project is being torn down
    Destroying,
    /// A workspace directory exists but the director CLI has no record of it
    /// (e.g. mid-first-deploy)
    Unknown,
}

impl ProjectStatus {
    /// Map a `director ls` status character
    pub fn from_code(code: char) -> Self {
        match code {
            '+' => Self::Done,
            '-' => Self::Failed,
            '!' => Self::Unfinished,
            'x' => Self::Destroying,
            _ => Self::Unknown,
        }
    }

    /// Lowercase word for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Unfinished => "unfinished",
            Self::Destroying => "destroying",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse `director ls` output: a header line followed by
/// `<status-char><space><project-name>` rows
pub fn parse_ls(output: &str) -> Vec<(String, ProjectStatus)> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let (code, name) = line.split_once(' ')?;
            let code = code.chars().next()?;
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), ProjectStatus::from_code(code)))
        })
        .collect()
}

/// Reconcile workspace directories against a `director ls` report
///
/// Every directory under the workspaces root starts as provisional
/// `Unknown`; CLI-reported entries overwrite or add, so the CLI wins when
/// both sides know a name, and names known only to the CLI still appear.
pub fn reconcile(
    workspaces_dir: &Path,
    ls_output: &str,
) -> io::Result<BTreeMap<String, ProjectStatus>> {
    let mut projects = BTreeMap::new();

    if workspaces_dir.is_dir() {
        for entry in fs::read_dir(workspaces_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let name = entry.file_name().to_string_lossy().into_owned();
                projects.insert(name, ProjectStatus::Unknown);
            }
        }
    }

    for (name, status) in parse_ls(ls_output) {
        projects.insert(name, status);
    }

    debug!("Reconciled {} projects", projects.len());

    Ok(projects)
}
