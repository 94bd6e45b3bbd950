//! Error types for the CLI

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested scenario does not exist
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
