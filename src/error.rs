//! Error types for the lipogram library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`LipogramError`] enum. Service-level failures (a single chat or
//! embedding call going wrong) are deliberately *not* surfaced through
//! `rewrite` — the engine treats them as a non-productive attempt and
//! keeps going. The variants here cover everything that is allowed to
//! reach a caller.
//!
//! # Examples
//!
//! ```
//! use lipogram::error::{LipogramError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LipogramError::invalid_argument("banned set must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lipogram operations.
#[derive(Error, Debug)]
pub enum LipogramError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, reading derivation, POS tagging)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Generation service errors (chat completion, embedding calls)
    #[error("Generation error: {0}")]
    Generation(String),

    /// Synonym dictionary errors (loading, lookup)
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Configuration errors (missing credentials, invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LipogramError.
pub type Result<T> = std::result::Result<T, LipogramError>;

impl LipogramError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LipogramError::Analysis(msg.into())
    }

    /// Create a new generation error.
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        LipogramError::Generation(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        LipogramError::Dictionary(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LipogramError::Configuration(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LipogramError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LipogramError::Other(msg.into())
    }
}
