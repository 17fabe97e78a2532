//! Error types for the core module.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that end a run.
///
/// Failing checks and non-convergence are not errors; they show up as a
/// `red` summary instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Agent call failed")]
    Agent(#[from] duet_agents::AgentError),

    #[error("Check run failed")]
    Checks(#[from] duet_checks::ChecksError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize run summary")]
    Serialization(#[from] serde_json::Error),
}
