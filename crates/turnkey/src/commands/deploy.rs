//! Deploy command implementation
//!
//! Loads the template's files, applies command-line overrides, and drives
//! the core lifecycle controller through a full deploy.

use crate::commands::shared::FileOverrides;
use anyhow::Result;
use tracing::{debug, instrument};
use turnkey_core::errors::{DeployError, TurnkeyError};
use turnkey_core::lifecycle::Lifecycle;
use turnkey_core::templates;
use turnkey_core::workspace::StagedFiles;

/// Deploy command arguments
#[derive(Debug)]
pub struct DeployArgs {
    /// Template display name or directory name
    pub template: String,
    /// Project name; defaults to the template's directory name
    pub project: Option<String>,
    /// Edited file contents to stage instead of the template defaults
    pub overrides: FileOverrides,
}

/// Execute the deploy command
#[instrument(skip(lifecycle, args), fields(template = %args.template))]
pub async fn execute_deploy(lifecycle: &Lifecycle, args: DeployArgs) -> Result<()> {
    let settings = lifecycle.settings();
    let template = templates::find(&settings.projects_dir, &args.template)?;
    let files = templates::load_files(&template)?;

    let mut staged = StagedFiles::from(&files);
    args.overrides.apply(&mut staged)?;

    let project = match args.project {
        Some(project) => project,
        None => template
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| template.name.clone()),
    };
    debug!("Deploying template {} as project {}", template.name, project);

    match lifecycle.deploy(&template.dir, &project, &staged).await {
        Ok(output) => {
            print!("{}", output);
            println!("{}: Deployed", project);
            crate::commands::shared::refresh_status(lifecycle, &project).await;
            Ok(())
        }
        Err(e) => {
            // The captured console output is the diagnostic payload on a
            // failed deploy; surface it before the error itself
            if let TurnkeyError::Deploy(DeployError::External { output, .. }) = &e {
                print!("{}", output);
            }
            Err(e.into())
        }
    }
}
