//! Check outcomes and the per-candidate report.

use serde::{Deserialize, Serialize};

/// The three checks every candidate goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Tests,
    Lint,
    TypeCheck,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tests => "tests",
            Self::Lint => "lint",
            Self::TypeCheck => "type_check",
        }
    }

    /// Header that introduces this check's log in feedback prompts.
    pub fn log_header(&self) -> &'static str {
        match self {
            Self::Tests => "=== Test Failures ===",
            Self::Lint => "=== Lint Errors ===",
            Self::TypeCheck => "=== Type Check Errors ===",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a single check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub passed: bool,
    /// Diagnostic output, only kept for failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    pub duration_ms: u64,
}

impl CheckOutcome {
    pub fn pass(kind: CheckKind, duration_ms: u64) -> Self {
        Self {
            kind,
            passed: true,
            log: None,
            duration_ms,
        }
    }

    pub fn fail(kind: CheckKind, log: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            kind,
            passed: false,
            log: Some(log.into()),
            duration_ms,
        }
    }
}

/// Outcomes of the three checks for one piece of code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub tests: CheckOutcome,
    pub lint: CheckOutcome,
    pub type_check: CheckOutcome,
}

impl CheckReport {
    pub fn new(tests: CheckOutcome, lint: CheckOutcome, type_check: CheckOutcome) -> Self {
        Self {
            tests,
            lint,
            type_check,
        }
    }

    /// Green iff every check passed.
    pub fn is_green(&self) -> bool {
        self.outcomes().all(|o| o.passed)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &CheckOutcome> {
        [&self.tests, &self.lint, &self.type_check].into_iter()
    }

    pub fn outcome(&self, kind: CheckKind) -> &CheckOutcome {
        match kind {
            CheckKind::Tests => &self.tests,
            CheckKind::Lint => &self.lint,
            CheckKind::TypeCheck => &self.type_check,
        }
    }

    pub fn failed_kinds(&self) -> Vec<CheckKind> {
        self.outcomes()
            .filter(|o| !o.passed)
            .map(|o| o.kind)
            .collect()
    }

    /// Failure logs under their section headers, `None` when green.
    pub fn failure_log(&self) -> Option<String> {
        let sections: Vec<String> = self
            .outcomes()
            .filter(|o| !o.passed)
            .map(|o| format!("{}\n{}", o.kind.log_header(), o.log.as_deref().unwrap_or("")))
            .collect();

        if sections.is_empty() {
            None
        } else {
            Some(sections.join("\n\n"))
        }
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.outcomes().map(|o| o.duration_ms).sum()
    }

    /// One-line summary such as `tests=pass lint=FAIL type_check=pass`.
    pub fn brief(&self) -> String {
        self.outcomes()
            .map(|o| format!("{}={}", o.kind, if o.passed { "pass" } else { "FAIL" }))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
