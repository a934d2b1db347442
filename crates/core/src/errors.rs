//! Error types and handling
//!
//! Domain-specific error enums (template, director, jail, deploy, preflight)
//! wrapped in the main `TurnkeyError` enum for unified handling. Staging and
//! marker-file I/O errors are not specially caught; they surface through the
//! top-level `Io` variant.

use thiserror::Error;

/// Template catalog errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Descriptor parsing error (`info.json`)
    #[error("Failed to parse template descriptor: {message}")]
    Parsing { message: String },

    /// Template directory or required file not found
    #[error("Template not found: {path}")]
    NotFound { path: String },

    /// Template file I/O error
    #[error("Failed to read template file")]
    Io(#[from] std::io::Error),
}

/// Director CLI errors
#[derive(Error, Debug)]
pub enum DirectorError {
    /// The director CLI has no record of the project
    #[error("No such project: {project}")]
    NoSuchProject { project: String },

    /// Structured output from the director CLI could not be parsed
    #[error("Failed to parse director output: {message}")]
    Parsing { message: String },

    /// Director CLI invocation failed before producing an exit code
    #[error("Director CLI error: {0}")]
    CLIError(String),
}

/// AppJail CLI errors
#[derive(Error, Debug)]
pub enum JailError {
    /// AppJail CLI invocation failed before producing an exit code
    #[error("AppJail CLI error: {0}")]
    CLIError(String),
}

/// Deployment errors
#[derive(Error, Debug)]
pub enum DeployError {
    /// The in-progress marker exists; a deploy is already in flight
    #[error("{project}: The project is currently being deployed")]
    AlreadyRunning { project: String },

    /// The done marker exists and the director record is complete
    #[error("{project}: The project already exists")]
    AlreadyExists { project: String },

    /// Project name does not match the allowed pattern
    #[error("Invalid project name: {name}")]
    InvalidName { name: String },

    /// The external deploy command returned non-zero; the captured output
    /// is the diagnostic payload
    #[error("Deploy failed with exit code {code}")]
    External { code: i32, output: String },
}

/// Startup precondition errors
#[derive(Error, Debug)]
pub enum PreflightError {
    /// A required external binary is absent from PATH
    #[error("{program}: Program required but not found")]
    MissingProgram { program: String },
}

/// Internal/generic fallback errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// Generic internal error
    #[error("Internal error: {message}")]
    Generic { message: String },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum TurnkeyError {
    /// Template catalog errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Director CLI errors
    #[error("Director error: {0}")]
    Director(#[from] DirectorError),

    /// AppJail CLI errors
    #[error("Jail error: {0}")]
    Jail(#[from] JailError),

    /// Deployment errors
    #[error("Deploy error: {0}")]
    Deploy(#[from] DeployError),

    /// Startup precondition errors
    #[error("Preflight error: {0}")]
    Preflight(#[from] PreflightError),

    /// Generic I/O failure (staging, marker files, workspace removal)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal/generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] InternalError),
}

/// Convenience type alias for Results with TurnkeyError
pub type Result<T> = std::result::Result<T, TurnkeyError>;
