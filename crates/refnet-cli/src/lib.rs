//! refnet CLI
//!
//! Inspect referral-network trees from the command line: statistics,
//! classes, paths, campaign filtering, the dashboard view and
//! consistency checks.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::build_command;
pub use commands::{run, Outcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
