//! Notelink CLI library
//!
//! This library provides the command-line interface for the notelink
//! vault linkifier.

pub mod commands;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod vault;

pub use error::{CliError, CliResult};
