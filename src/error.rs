//! Error types for anaphor.

use thiserror::Error;

/// Result type for anaphor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for anaphor operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A configuration constant is missing or outside its valid range.
    ///
    /// Fatal: the resolver refuses to process any document with an invalid
    /// model, since the numeric behavior would otherwise be undefined.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A sentence or token is missing a required annotation (POS tag,
    /// dependency relation) or carries an inconsistent dependency tree.
    ///
    /// Recoverable: the offending sentence is skipped and the rest of the
    /// document is still processed.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a malformed input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }
}
