//! Error types for snapsort

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for snapsort operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for snapsort
///
/// The per-file variants are collected into the end-of-run report;
/// `Listing` is fatal and aborts before any worker starts.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open file '{name}': {source}")]
    Open {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to probe content type of '{name}': {source}")]
    Probe {
        name: String,
        source: std::io::Error,
    },

    #[error("ignore '{name}' because of unsupported content type '{detected}'")]
    Unsupported { name: String, detected: String },

    #[error("failed to read EXIF time from '{name}': {message}")]
    NoMetadata { name: String, message: String },

    #[error("failed to create directory '{dir}': {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to move '{name}' to '{dir}': {source}")]
    Move {
        name: String,
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory '{dir}': {source}")]
    Listing {
        dir: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error aborts the whole run instead of being
    /// collected into the per-file report.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Listing { .. })
    }
}
