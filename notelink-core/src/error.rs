//! Engine errors

use thiserror::Error;

/// Errors produced while preparing a linker.
#[derive(Debug, Error)]
pub enum Error {
    /// A title could not be compiled into a match pattern.
    #[error("cannot build a match pattern for {title:?}")]
    Pattern {
        /// The title or acronym the pattern was built from.
        title: String,
        /// The underlying compilation failure.
        #[source]
        source: regex::Error,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
