//! Start, stop, destroy, and rm command implementations
//!
//! Thin wrappers over the core lifecycle controller: echo the captured
//! output and turn a non-zero exit into a command failure.

use crate::commands::shared::refresh_status;
use anyhow::{bail, Result};
use tracing::{info, instrument, warn};
use turnkey_core::lifecycle::Lifecycle;

/// Execute the start command
#[instrument(skip(lifecycle))]
pub async fn execute_start(lifecycle: &Lifecycle, project: &str) -> Result<()> {
    let report = lifecycle.start(project).await?;
    print!("{}", report.output);
    if !report.success() {
        bail!("{}: Start failed with exit code {}", project, report.code);
    }
    info!("{}: Started", project);
    refresh_status(lifecycle, project).await;
    Ok(())
}

/// Execute the stop command
#[instrument(skip(lifecycle))]
pub async fn execute_stop(lifecycle: &Lifecycle, project: &str) -> Result<()> {
    let report = lifecycle.stop(project).await?;
    print!("{}", report.output);
    if !report.success() {
        bail!("{}: Stop failed with exit code {}", project, report.code);
    }
    info!("{}: Stopped", project);
    refresh_status(lifecycle, project).await;
    Ok(())
}

/// Execute the destroy command
#[instrument(skip(lifecycle))]
pub async fn execute_destroy(lifecycle: &Lifecycle, project: &str) -> Result<()> {
    let report = lifecycle.destroy(project).await?;
    print!("{}", report.output);
    if !report.success() {
        bail!("{}: Destroy failed with exit code {}", project, report.code);
    }
    info!("{}: Destroyed", project);
    refresh_status(lifecycle, project).await;
    Ok(())
}

/// Execute the rm command
///
/// The workspace directory is removed even when the external teardown
/// fails, so this command succeeds as long as the directory is gone.
#[instrument(skip(lifecycle))]
pub async fn execute_rm(lifecycle: &Lifecycle, project: &str) -> Result<()> {
    let report = lifecycle.destroy_workspace(project).await?;
    print!("{}", report.output);
    if !report.success() {
        warn!(
            "{}: Teardown exited with code {}; workspace removed anyway",
            project, report.code
        );
    }
    info!("{}: Removed", project);
    refresh_status(lifecycle, project).await;
    Ok(())
}
