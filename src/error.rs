//! Error types for hikr-dl
//!
//! Two layers of errors live here:
//! - [`Error`], the crate-wide error used by configuration, fetching and the
//!   download loop. Most variants are per-iteration and get logged and skipped;
//!   the few fatal ones abort the run (see [`Error::exit_code`]).
//! - [`ExtractError`], the typed failure of the title extractor, telling which
//!   delimiter was missing from a post page.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hikr-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for hikr-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "image_base_url")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error (DNS, connect, timeout, broken body stream)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client could not be built
    #[error("failed to initialise HTTP client: {0}")]
    ClientInit(String),

    /// A working directory is missing or is not a directory
    #[error("required directory {path} does not exist or is not a directory")]
    MissingDirectory {
        /// The directory that was expected to exist
        path: PathBuf,
    },

    /// The requested number of photo IDs could not be allocated
    #[error("cannot allocate storage for {requested} photo IDs")]
    IdAllocation {
        /// Number of IDs that were requested
        requested: usize,
    },

    /// A post page that was downloaded could not be opened for reading
    #[error("cannot read post page {path}: {source}")]
    PostPageUnreadable {
        /// Path of the downloaded post page
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Title extraction failed
    #[error("title extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// The extracted title cannot be used as a file name
    #[error("title {title:?} cannot be used as a file name: {reason}")]
    InvalidTitle {
        /// The title as extracted from the post page
        title: String,
        /// Why the title was rejected
        reason: String,
    },

    /// A file already exists at the rename destination and the policy forbids replacing it
    #[error("file collision at {path}")]
    FileCollision {
        /// The destination that is already taken
        path: PathBuf,
    },

    /// Renaming the transient image failed
    #[error("failed to rename {from} to {to}: {reason}")]
    Rename {
        /// The transient image path
        from: PathBuf,
        /// The title-based destination path
        to: PathBuf,
        /// The reason the rename failed
        reason: String,
    },
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Process exit code for an error that aborts the run
    ///
    /// Configuration mistakes share clap's usage-error code (2); every other
    /// fatal condition exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config { .. } | Error::Serialization(_) => 2,
            _ => 1,
        }
    }
}

/// Failure modes of the title extractor
///
/// Each variant names the first delimiter that could not be found; the search
/// stops at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The content block marker does not occur in the document
    #[error("content block marker not found")]
    MarkerNotFound,

    /// The marker occurs but no closing `</div>` follows it
    #[error("content block is not terminated")]
    UnterminatedBlock,

    /// The content block holds no complete `<a ...>...</a>` link
    #[error("no link found in content block")]
    LinkNotFound,
}
