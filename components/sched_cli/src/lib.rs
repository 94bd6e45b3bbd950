//! Scheduler demonstration CLI library
//!
//! Provides the argument definitions and named demonstration scenarios
//! for the `cadence` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod scenarios;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use scenarios::{list_scenarios, run_scenario};
