//! Deploy log retrieval
//!
//! The director CLI keeps per-run log directories and reports the most
//! recent one through `describe`. Log retrieval reads every file in that
//! directory; display names carry the run directory's name so operators can
//! tell which run a file belongs to.

use crate::director::{self, CheckStatus};
use crate::errors::{DirectorError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// One log file from the most recent deploy run
#[derive(Debug, Clone)]
pub struct LogFile {
    /// Display name: `<run-dir>/<file-name>`
    pub name: String,
    /// Full file content
    pub content: String,
}

/// Fetch the most recent deploy logs of a project
///
/// Fails with [`DirectorError::NoSuchProject`] when the director CLI has no
/// record of the project at all. Files are returned sorted by display name.
#[instrument(level = "debug")]
pub async fn read_logs(project: &str) -> Result<Vec<LogFile>> {
    if director::check(project).await? == CheckStatus::Absent {
        return Err(DirectorError::NoSuchProject {
            project: project.to_string(),
        }
        .into());
    }

    let description = director::describe(project).await?;
    let files = collect_log_files(&description.last_log)?;
    debug!("Collected {} log files for {}", files.len(), project);
    Ok(files)
}

/// Read every regular file directly under a log run directory
fn collect_log_files(run_dir: &Path) -> Result<Vec<LogFile>> {
    let run_name = run_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut files = Vec::new();
    if run_dir.is_dir() {
        for entry in fs::read_dir(run_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let content = fs::read_to_string(entry.path())?;
            files.push(LogFile {
                name: format!("{}/{}", run_name, file_name),
                content,
            });
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_log_files_sorted_with_run_prefix() {
        let temp = TempDir::new().unwrap();
        let run = temp.path().join("2024-06-01_12:00:00");
        fs::create_dir(&run).unwrap();
        fs::write(run.join("web.log"), "jail web started\n").unwrap();
        fs::write(run.join("db.log"), "jail db started\n").unwrap();

        let files = collect_log_files(&run).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "2024-06-01_12:00:00/db.log");
        assert_eq!(files[0].content, "jail db started\n");
        assert_eq!(files[1].name, "2024-06-01_12:00:00/web.log");
    }

    #[test]
    fn test_collect_log_files_skips_subdirectories() {
        let temp = TempDir::new().unwrap();
        let run = temp.path().join("run");
        fs::create_dir_all(run.join("nested")).unwrap();
        fs::write(run.join("only.log"), "x").unwrap();

        let files = collect_log_files(&run).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "run/only.log");
    }

    #[test]
    fn test_collect_log_files_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let files = collect_log_files(&temp.path().join("gone")).unwrap();
        assert!(files.is_empty());
    }
}
