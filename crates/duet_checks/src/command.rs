//! Command execution seam for the external check tools.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::error::{ChecksError, ChecksResult};

/// Result of running one external command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl CommandOutput {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Get combined output (stdout + stderr).
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Runs an external program to completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> ChecksResult<CommandOutput>;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> ChecksResult<CommandOutput> {
        debug!(program, ?args, "Running check command");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let started_at = Utc::now();
        let start = Instant::now();
        let output = command.output().await.map_err(|source| ChecksError::Spawn {
            program: program.to_string(),
            source,
        })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_captures_exit_code_and_output() {
        let runner = ProcessRunner::new();
        let args = vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()];

        let output = runner.run("sh", &args).await.unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_success() {
        let output = ProcessRunner::new().run("true", &[]).await.unwrap();
        assert!(output.success());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = ProcessRunner::new()
            .run("duet-no-such-tool-xyz", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ChecksError::Spawn { ref program, .. } if program == "duet-no-such-tool-xyz"));
    }

    #[test]
    fn test_combined_output_joins_streams() {
        let output = CommandOutput {
            exit_code: Some(1),
            stdout: "F".to_string(),
            stderr: "trace".to_string(),
            started_at: Utc::now(),
            duration_ms: 5,
        };
        assert_eq!(output.combined_output(), "F\ntrace");
    }
}
