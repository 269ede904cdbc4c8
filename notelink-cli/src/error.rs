//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Vault directory missing or not a directory
    VaultNotFound(String),
    /// A note named on the command line is not part of the vault
    NoteNotFound(String),
    /// A destination file already exists and --force was not given
    DestinationExists(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::VaultNotFound(path) => write!(f, "Vault not found: {path}"),
            CliError::NoteNotFound(path) => write!(f, "Note not found in vault: {path}"),
            CliError::DestinationExists(path) => {
                write!(f, "Destination already exists: {path}")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
