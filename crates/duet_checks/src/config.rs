//! Check runner configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::report::CheckKind;

/// Argument token replaced by the scratch file path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// One external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCommand {
    /// Program to execute
    pub program: String,
    /// Arguments; `{file}` is substituted with the scratch path
    pub args: Vec<String>,
}

impl CheckCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `pytest -q {file}`
    pub fn pytest() -> Self {
        Self::new("pytest", ["-q", FILE_PLACEHOLDER])
    }

    /// `ruff check {file}`
    pub fn ruff() -> Self {
        Self::new("ruff", ["check", FILE_PLACEHOLDER])
    }

    /// `mypy --strict {file}`
    pub fn mypy() -> Self {
        Self::new("mypy", ["--strict", FILE_PLACEHOLDER])
    }

    /// Arguments with the placeholder resolved against `file`.
    pub fn resolve_args(&self, file: &Path) -> Vec<String> {
        let file = file.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, &file))
            .collect()
    }

    /// Human-readable command line, for logs.
    pub fn display(&self, file: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.resolve_args(file));
        parts.join(" ")
    }
}

/// Where candidates are written and which tools run against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Scratch file overwritten on every evaluation
    pub scratch_file: PathBuf,
    pub tests: CheckCommand,
    pub lint: CheckCommand,
    pub types: CheckCommand,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            scratch_file: PathBuf::from("workspace").join("temp.py"),
            tests: CheckCommand::pytest(),
            lint: CheckCommand::ruff(),
            types: CheckCommand::mypy(),
        }
    }
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scratch_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_file = path.into();
        self
    }

    pub fn with_tests(mut self, command: CheckCommand) -> Self {
        self.tests = command;
        self
    }

    pub fn with_lint(mut self, command: CheckCommand) -> Self {
        self.lint = command;
        self
    }

    pub fn with_types(mut self, command: CheckCommand) -> Self {
        self.types = command;
        self
    }

    /// Command for a given check.
    pub fn command(&self, kind: CheckKind) -> &CheckCommand {
        match kind {
            CheckKind::Tests => &self.tests,
            CheckKind::Lint => &self.lint,
            CheckKind::TypeCheck => &self.types,
        }
    }
}
