//! Logs command implementation

use anyhow::Result;
use tracing::instrument;
use turnkey_core::logs;

/// Execute the logs command: print the most recent deploy logs of a project
#[instrument]
pub async fn execute_logs(project: &str) -> Result<()> {
    let files = logs::read_logs(project).await?;

    for file in &files {
        println!("==> {} <==", file.name);
        print!("{}", file.content);
        if !file.content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
