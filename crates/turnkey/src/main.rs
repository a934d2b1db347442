use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let parsed = cli::Cli::parse();

    // Dispatch to CLI handler and handle special exit codes
    match parsed.dispatch().await {
        Ok(()) => Ok(()),
        Err(err) => {
            // Missing external binaries get exit code 2 so callers can tell
            // a broken environment from a failed action
            if let Some(turnkey_error) = err.downcast_ref::<turnkey_core::errors::TurnkeyError>() {
                if matches!(
                    turnkey_error,
                    turnkey_core::errors::TurnkeyError::Preflight(_)
                ) {
                    eprintln!("Error: {}", turnkey_error);
                    std::process::exit(2);
                }
            }

            // For all other errors, return them normally
            Err(err)
        }
    }
}
