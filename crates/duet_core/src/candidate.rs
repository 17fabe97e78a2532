//! Candidate artifacts owned by the two coding agents.

use duet_checks::CheckReport;
use serde::{Deserialize, Serialize};

/// Which coding agent owns a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    A,
    B,
}

impl Owner {
    /// The agent that reviews this owner's code.
    pub fn reviewer(&self) -> Owner {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// The current code of one agent.
///
/// Replaced wholesale on every revision; no diffs are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub owner: Owner,
    pub code: String,
    /// Number of times the code was replaced after generation
    pub revisions: u32,
    /// Most recent check result for this code, if checked since the last change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_report: Option<CheckReport>,
}

impl Candidate {
    pub fn new(owner: Owner, code: impl Into<String>) -> Self {
        Self {
            owner,
            code: code.into(),
            revisions: 0,
            last_report: None,
        }
    }

    /// Swap in new code; the previous report no longer applies.
    pub fn replace(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.revisions += 1;
        self.last_report = None;
    }

    pub fn record_report(&mut self, report: CheckReport) {
        self.last_report = Some(report);
    }

    /// Green iff the current code has been checked and passed.
    pub fn is_green(&self) -> bool {
        self.last_report.as_ref().is_some_and(CheckReport::is_green)
    }

    pub fn failure_log(&self) -> Option<String> {
        self.last_report.as_ref().and_then(CheckReport::failure_log)
    }
}
