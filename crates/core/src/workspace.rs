//! Workspace staging and sentinel-file state tracking
//!
//! A workspace is a deployed instance of a template. Its local lifecycle
//! state is encoded by two sentinel markers: `.progress` (a deploy is in
//! flight) and `.done` (the last deploy succeeded). The markers are the
//! local half of project state; the director CLI's own records are the
//! authoritative half, merged in the registry module.
//!
//! Promotion from in-progress to done is a single rename, so there is never
//! a moment where both markers exist.

use crate::errors::Result;
use crate::settings::{done_file, in_progress_file, DIRECTOR_FILE, ENV_FILE};
use crate::templates::TemplateFiles;
use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, instrument};

/// Local deployment state of a workspace, read from the sentinel pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
    /// No workspace directory exists
    Absent,
    /// The in-progress marker exists; a deploy is running
    InProgress,
    /// The done marker exists; the last deploy succeeded
    Done,
    /// The directory exists with neither marker (failed or interrupted deploy)
    Unfinished,
}

/// Read the local deployment state of a workspace directory
pub fn deploy_state(workspace: &Path) -> DeployState {
    if !workspace.is_dir() {
        DeployState::Absent
    } else if in_progress_file(workspace).is_file() {
        DeployState::InProgress
    } else if done_file(workspace).is_file() {
        DeployState::Done
    } else {
        DeployState::Unfinished
    }
}

/// Operator-edited file contents to write over the copied template defaults
#[derive(Debug, Clone, Default)]
pub struct StagedFiles {
    /// Director composition file content
    pub director: String,
    /// Environment file content; an empty file is written when absent
    pub env: Option<String>,
    /// File name -> content for each extra config file
    pub extras: IndexMap<String, String>,
}

impl From<&TemplateFiles> for StagedFiles {
    fn from(files: &TemplateFiles) -> Self {
        let extras = files
            .extras
            .values()
            .map(|extra| (extra.filename.clone(), extra.content.clone()))
            .collect();
        Self {
            director: files.director.clone(),
            env: files.env.clone(),
            extras,
        }
    }
}

/// Materialize a template into a fresh workspace directory
///
/// Any prior workspace for the project is discarded first. The template tree
/// is copied preserving symbolic links, the operator-edited contents
/// overwrite the copied defaults, and the in-progress marker is created
/// last. The caller holds the deploy guard (see the lifecycle module).
#[instrument(level = "debug", skip(files))]
pub fn stage(template_dir: &Path, workspace: &Path, files: &StagedFiles) -> Result<()> {
    if workspace.is_dir() {
        debug!("Discarding prior workspace {}", workspace.display());
        fs::remove_dir_all(workspace)?;
    }

    copy_tree(template_dir, workspace)?;
    write_contents(workspace, files)?;
    fs::write(in_progress_file(workspace), "")?;

    Ok(())
}

/// Promote the in-progress marker to the done marker after a successful deploy
pub fn promote(workspace: &Path) -> Result<()> {
    fs::rename(in_progress_file(workspace), done_file(workspace))?;
    Ok(())
}

/// Remove the in-progress marker after a failed deploy, leaving neither marker
pub fn clear_in_progress(workspace: &Path) -> Result<()> {
    fs::remove_file(in_progress_file(workspace))?;
    Ok(())
}

/// Persist operator-edited contents back into the template directory itself
///
/// This is the "Save" action: it changes the template's own files and never
/// touches sentinels or workspaces.
#[instrument(level = "debug", skip(files))]
pub fn save_template(template_dir: &Path, files: &StagedFiles) -> Result<()> {
    write_contents(template_dir, files)?;
    Ok(())
}

fn write_contents(dir: &Path, files: &StagedFiles) -> io::Result<()> {
    fs::write(dir.join(DIRECTOR_FILE), &files.director)?;
    fs::write(dir.join(ENV_FILE), files.env.as_deref().unwrap_or(""))?;
    for (filename, content) in &files.extras {
        fs::write(dir.join(filename), content)?;
    }
    Ok(())
}

/// Recursively copy a directory tree, preserving symbolic links
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            copy_symlink(&from, &to)?;
        } else if file_type.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    let target = fs::read_link(from)?;
    std::os::unix::fs::symlink(target, to)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    // No symlink preservation off unix; fall back to copying the target
    fs::copy(from, to).map(|_| ())
}
