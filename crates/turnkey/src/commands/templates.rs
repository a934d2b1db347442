//! Template management command implementations

use crate::cli::OutputFormat;
use crate::commands::shared::FileOverrides;
use anyhow::Result;
use std::fs;
use tracing::{info, instrument};
use turnkey_core::settings::Settings;
use turnkey_core::templates;
use turnkey_core::workspace::{self, StagedFiles};

/// Execute the templates list command
#[instrument(skip(settings))]
pub fn execute_list(settings: &Settings, output: OutputFormat) -> Result<()> {
    let catalog = templates::catalog(&settings.projects_dir)?;

    match output {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = catalog
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name,
                        "dir": t.dir,
                        "description": t.info.description,
                        "www": t.info.www,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for template in &catalog {
                match &template.info.description {
                    Some(description) => println!("{}: {}", template.name, description),
                    None => println!("{}", template.name),
                }
            }
        }
    }

    Ok(())
}

/// Execute the templates rm command
#[instrument(skip(settings))]
pub fn execute_rm(settings: &Settings, name: &str) -> Result<()> {
    let template = templates::find(&settings.projects_dir, name)?;
    fs::remove_dir_all(&template.dir)?;
    info!("{}: Template removed", template.name);
    Ok(())
}

/// Save command arguments
#[derive(Debug)]
pub struct SaveArgs {
    /// Template display name or directory name
    pub template: String,
    /// Edited file contents to write back into the template
    pub overrides: FileOverrides,
}

/// Execute the templates save command
///
/// Writes edited file contents back into the template directory itself;
/// deployed workspaces are unaffected.
#[instrument(skip(settings, args), fields(template = %args.template))]
pub fn execute_save(settings: &Settings, args: SaveArgs) -> Result<()> {
    let template = templates::find(&settings.projects_dir, &args.template)?;
    let files = templates::load_files(&template)?;

    let mut staged = StagedFiles::from(&files);
    args.overrides.apply(&mut staged)?;

    workspace::save_template(&template.dir, &staged)?;
    info!("{}: Template saved", template.name);
    Ok(())
}
