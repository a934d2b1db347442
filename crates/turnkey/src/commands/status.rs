//! Status command implementation

use crate::cli::OutputFormat;
use anyhow::Result;
use std::collections::BTreeMap;
use tracing::instrument;
use turnkey_core::lifecycle::Lifecycle;

/// Execute the status command
#[instrument(skip(lifecycle))]
pub async fn execute_status(lifecycle: &Lifecycle, output: OutputFormat) -> Result<()> {
    let projects = lifecycle.refresh().await?;

    match output {
        OutputFormat::Json => {
            let map: BTreeMap<&String, &str> = projects
                .iter()
                .map(|(name, status)| (name, status.as_str()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Text => {
            for (name, status) in &projects {
                println!("{:<12} {}", status.as_str(), name);
            }
        }
    }

    Ok(())
}
