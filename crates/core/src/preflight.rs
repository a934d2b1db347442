//! Startup requirement checks
//!
//! Every command shells out to the AppJail CLIs, so their absence is
//! reported once, up front, instead of as a confusing mid-action failure.

use crate::errors::{PreflightError, Result};
use crate::settings::REQUIREMENTS;
use tracing::debug;

/// Verify that each named program is resolvable on `PATH`
pub fn require(programs: &[&str]) -> Result<()> {
    for program in programs {
        match which::which(program) {
            Ok(path) => debug!("Found {} at {}", program, path.display()),
            Err(_) => {
                return Err(PreflightError::MissingProgram {
                    program: program.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Verify the AppJail CLIs this tool drives
pub fn require_programs() -> Result<()> {
    require(&REQUIREMENTS)
}
