//! External process execution
//!
//! The sole path to the operating system for the rest of the crate. Every
//! external command runs as one child process on a blocking worker while the
//! async caller suspends; a non-zero exit code is a normal, inspectable
//! result, never an error of the runner itself.

use std::io;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// What to do with the child's stderr stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrMode {
    /// Interleave stderr into the captured output
    Merge,
    /// Drop stderr entirely
    Discard,
}

/// Exit code and captured output of a finished child process
#[derive(Debug, Clone)]
pub struct ProcOutput {
    /// Child exit code (-1 if terminated without one)
    pub code: i32,
    /// Captured stdout, with stderr merged in under [`StderrMode::Merge`]
    pub output: String,
}

impl ProcOutput {
    /// True when the child exited with code 0
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Run an external command to completion and capture its output
///
/// No timeout is applied; the command runs until it exits. Callers that need
/// responsiveness must wrap the returned future themselves.
#[instrument(level = "debug", skip(argv), fields(program = %argv.first().map(String::as_str).unwrap_or("?")))]
pub async fn run(
    argv: Vec<String>,
    cwd: Option<PathBuf>,
    stderr: StderrMode,
) -> io::Result<ProcOutput> {
    debug!("Running external command: {:?} (cwd: {:?})", argv, cwd);

    tokio::task::spawn_blocking(move || {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"))?;

        let mut expr = duct::cmd(program, args).unchecked();
        if let Some(dir) = &cwd {
            expr = expr.dir(dir);
        }
        // Redirect stderr before capturing stdout: duct applies redirections
        // innermost-first, so the other order joins stderr to the parent's
        // stdout instead of the capture pipe
        expr = match stderr {
            StderrMode::Merge => expr.stderr_to_stdout(),
            StderrMode::Discard => expr.stderr_null(),
        };

        let out = expr.stdout_capture().run()?;
        let code = out.status.code().unwrap_or(-1);
        let output = String::from_utf8_lossy(&out.stdout).into_owned();

        debug!("Command exited with code {}", code);

        Ok(ProcOutput { code, output })
    })
    .await
    .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Task join error: {}", e)))?
}

/// Convenience for commands whose argument vectors are static
pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
