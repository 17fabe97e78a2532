//! Error types for the check runner.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for check operations.
pub type ChecksResult<T> = Result<T, ChecksError>;

/// Errors that stop a check run.
///
/// A tool reporting failures is not an error; it is a failed
/// [`CheckOutcome`](crate::CheckOutcome).
#[derive(Error, Debug)]
pub enum ChecksError {
    #[error("Failed to write scratch file {}", path.display())]
    ScratchWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}
