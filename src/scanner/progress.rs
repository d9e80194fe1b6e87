//! Progress reporting types for the scanner module.

use std::path::PathBuf;

use crate::tree::Metrics;

use super::EntryError;

/// Events emitted while a scan runs.
#[derive(Debug)]
pub enum ScanProgress {
    /// Scan has started
    Started {
        /// The validated root directory
        root: PathBuf,
    },

    /// An entry was skipped and left out of every aggregate
    Error {
        /// The path that could not be read
        path: PathBuf,
        /// Why it was skipped
        error: EntryError,
    },

    /// Scan completed successfully
    Completed {
        /// Number of files listed in the tree
        total_files: u64,
        /// Total metrics of the root directory
        total: Metrics,
    },
}
