//! Jail management command implementations

use crate::cli::{JailCommands, OutputFormat};
use anyhow::{bail, Result};
use tracing::{info, instrument};
use turnkey_core::jail;

/// Attributes shown by `jails list` when none are requested
const DEFAULT_KEYWORDS: [&str; 6] = ["name", "status", "type", "version", "ports", "network_ip4"];

/// Execute a jails subcommand
#[instrument(skip(command))]
pub async fn execute(command: JailCommands) -> Result<()> {
    match command {
        JailCommands::List { keyword, output } => execute_list(&keyword, output).await,
        JailCommands::Start { jail } => {
            let out = jail::start(&jail).await?;
            print!("{}", out.output);
            if !out.success() {
                bail!("{}: Start failed with exit code {}", jail, out.code);
            }
            info!("{}: Jail started", jail);
            Ok(())
        }
        JailCommands::Stop { jail } => {
            let out = jail::stop(&jail).await?;
            print!("{}", out.output);
            if !out.success() {
                bail!("{}: Stop failed with exit code {}", jail, out.code);
            }
            info!("{}: Jail stopped", jail);
            Ok(())
        }
        JailCommands::Restart { jail } => {
            let out = jail::restart(&jail).await?;
            print!("{}", out.output);
            if !out.success() {
                bail!("{}: Restart failed with exit code {}", jail, out.code);
            }
            info!("{}: Jail restarted", jail);
            Ok(())
        }
        JailCommands::Destroy { jail } => {
            let out = jail::destroy(&jail).await?;
            print!("{}", out.output);
            if !out.success() {
                bail!("{}: Destroy failed with exit code {}", jail, out.code);
            }
            info!("{}: Jail destroyed", jail);
            Ok(())
        }
        JailCommands::Status { jail } => {
            // Only the exit code carries meaning: 0 means running
            let code = jail::status(&jail).await?;
            if code == 0 {
                println!("{}: running", jail);
            } else {
                println!("{}: stopped", jail);
            }
            Ok(())
        }
    }
}

async fn execute_list(keywords: &[String], output: OutputFormat) -> Result<()> {
    let keywords: Vec<&str> = if keywords.is_empty() {
        DEFAULT_KEYWORDS.to_vec()
    } else {
        keywords.iter().map(|k| k.as_str()).collect()
    };

    let table = jail::get_jails(&keywords).await?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        OutputFormat::Text => {
            for (i, attrs) in table.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                for (keyword, value) in attrs {
                    println!("{}: {}", keyword, value);
                }
            }
        }
    }

    Ok(())
}
