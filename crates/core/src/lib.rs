//! Core library for the turnkey deployment orchestrator
//!
//! This crate contains shared logic for template cataloging, workspace
//! staging, project status reconciliation, lifecycle control of AppJail
//! Director projects, logging, and error handling. The binary crate wires
//! these pieces to a CLI surface.

pub mod director;
pub mod errors;
pub mod exec;
pub mod jail;
pub mod lifecycle;
pub mod logging;
pub mod logs;
pub mod preflight;
pub mod registry;
pub mod settings;
pub mod templates;
pub mod workspace;

// Re-export IndexMap for use by dependent crates (preserves insertion order
// of template extra-files maps)
pub use indexmap::IndexMap;

/// Get the version of the core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
