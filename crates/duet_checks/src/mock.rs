//! Mock command runner for testing.
//!
//! Provides a configurable [`CommandRunner`] that returns queued responses
//! per program and captures every call, so the review loop can be tested
//! without pytest, ruff or mypy installed.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::command::{CommandOutput, CommandRunner};
use crate::error::{ChecksError, ChecksResult};

/// Predefined mock response for a command.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
    /// When set, the call fails as if the program could not be launched.
    pub launch_error: Option<String>,
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            duration_ms: 10,
            launch_error: None,
        }
    }

    pub fn failure(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: String::new(),
            duration_ms: 10,
            launch_error: None,
        }
    }

    pub fn not_installed(message: impl Into<String>) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: String::new(),
            duration_ms: 0,
            launch_error: Some(message.into()),
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }
}

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub program: String,
    pub args: Vec<String>,
    /// Contents of the first argument that named a readable file.
    pub file_snapshot: Option<String>,
}

/// Mock command runner.
#[derive(Clone)]
pub struct MockRunner {
    /// Queued responses keyed by program name.
    responses: Arc<RwLock<HashMap<String, VecDeque<MockResponse>>>>,
    /// Response used once a program's queue is empty.
    default_response: Arc<RwLock<MockResponse>>,
    /// Captured calls for verification.
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            default_response: Arc::new(RwLock::new(MockResponse::success(""))),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a response for the next call to `program`.
    pub fn add_response(self, program: impl Into<String>, response: MockResponse) -> Self {
        self.responses
            .write()
            .entry(program.into())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue several responses for `program`.
    pub fn with_responses(self, program: impl Into<String>, responses: Vec<MockResponse>) -> Self {
        self.responses
            .write()
            .entry(program.into())
            .or_default()
            .extend(responses);
        self
    }

    /// Response returned when nothing is queued.
    pub fn with_default(self, response: MockResponse) -> Self {
        *self.default_response.write() = response;
        self
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    /// Get calls to a specific program.
    pub fn calls_to(&self, program: &str) -> Vec<CapturedCall> {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }

    fn next_response(&self, program: &str) -> MockResponse {
        self.responses
            .write()
            .get_mut(program)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.default_response.read().clone())
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, program: &str, args: &[String]) -> ChecksResult<CommandOutput> {
        let file_snapshot = args
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .and_then(|p| std::fs::read_to_string(p).ok());

        self.captured_calls.write().push(CapturedCall {
            program: program.to_string(),
            args: args.to_vec(),
            file_snapshot,
        });

        let response = self.next_response(program);
        if let Some(message) = response.launch_error {
            return Err(ChecksError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message),
            });
        }

        Ok(CommandOutput {
            exit_code: Some(response.exit_code),
            stdout: response.stdout,
            stderr: response.stderr,
            started_at: Utc::now(),
            duration_ms: response.duration_ms,
        })
    }
}
