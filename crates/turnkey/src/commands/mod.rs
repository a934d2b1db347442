//! Command implementations for the turnkey CLI
//!
//! Each subcommand lives in its own module with an `execute_*` entry point.
//! Captured output from the external CLIs is echoed to stdout; structured
//! logs go to stderr.

pub mod deploy;
pub mod jails;
pub mod lifecycle;
pub mod logs;
pub mod shared;
pub mod status;
pub mod templates;
