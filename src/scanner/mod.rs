//! Scanner module for traversing directories and building the aggregation
//! tree.
//!
//! The walk is a single-threaded, depth-first pass over the filesystem using
//! walkdir. Exclusion rules prune entries before they are visited and
//! per-entry failures are reported on the progress channel instead of
//! aborting the scan.

mod counter;
mod filter;
mod options;
mod progress;
mod walker;

pub use options::{ScanOptions, DEFAULT_CHARS_PER_TOKEN};
pub use progress::ScanProgress;
pub use walker::Scanner;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scan before any tree is built.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Permission denied when accessing the root
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed
        path: PathBuf,
    },

    /// The specified path does not exist
    #[error("path not found: {path}")]
    PathNotFound {
        /// The path that was not found
        path: PathBuf,
    },

    /// An I/O error occurred while accessing the root
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The specified path is not a directory
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that was expected to be a directory
        path: PathBuf,
    },

    /// The options could not be turned into scan rules
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ScanError {
    fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            io::ErrorKind::NotFound => ScanError::PathNotFound { path },
            _ => ScanError::IoError { path, source },
        }
    }
}

/// Invalid scan configuration, reported before scanning starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid exclude regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("chars per token must be greater than 0 (got {0})")]
    InvalidCharsPerToken(f64),
}

/// Why a single entry was left out of the tree.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("{0}")]
    Io(#[source] io::Error),

    #[error("{0}")]
    Walk(String),
}

impl From<io::Error> for EntryError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            EntryError::PermissionDenied
        } else {
            EntryError::Io(err)
        }
    }
}

impl From<walkdir::Error> for EntryError {
    fn from(err: walkdir::Error) -> Self {
        let message = err.to_string();
        match err.into_io_error() {
            Some(io_err) => io_err.into(),
            None => EntryError::Walk(message),
        }
    }
}
