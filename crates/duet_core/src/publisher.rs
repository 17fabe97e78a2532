//! Result publishing.
//!
//! Each run leaves two files in the output directory:
//!
//! ```text
//! output/
//! ├── output_20240101_120000.py      # final artifact
//! └── summary_20240101_120000.json   # {"files": [...], "status": "green"|"red"}
//! ```

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use duet_checks::{CheckReport, CheckRunner};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CoreResult;

/// Timestamp format used in output file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Final status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Green,
    Red,
}

impl RunStatus {
    pub fn from_report(report: &CheckReport) -> Self {
        if report.is_green() {
            Self::Green
        } else {
            Self::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Machine-readable run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub files: Vec<String>,
    pub status: RunStatus,
}

/// Paths and status of a published run.
#[derive(Debug, Clone)]
pub struct PublishedRun {
    pub artifact_path: PathBuf,
    pub summary_path: PathBuf,
    pub summary: Summary,
    /// Check result for the published artifact
    pub report: CheckReport,
}

/// Writes the final artifact and its summary.
pub struct ResultPublisher {
    output_dir: PathBuf,
    extension: String,
    checks: CheckRunner,
}

impl ResultPublisher {
    pub fn new(output_dir: impl Into<PathBuf>, checks: CheckRunner) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: "py".to_string(),
            checks,
        }
    }

    /// File extension for the artifact, without the dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Publish `code` under the current local timestamp.
    pub async fn publish(&self, code: &str) -> CoreResult<PublishedRun> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.publish_with_stamp(code, &stamp).await
    }

    /// Publish `code` under an explicit timestamp.
    ///
    /// If files for `stamp` already exist, `_1`, `_2`, ... is appended so an
    /// earlier run is never overwritten. When the final check cannot run, the
    /// artifact is removed again and nothing is published.
    pub async fn publish_with_stamp(&self, code: &str, stamp: &str) -> CoreResult<PublishedRun> {
        fs::create_dir_all(&self.output_dir)?;

        let (artifact_path, summary_path) = self.free_paths(stamp);
        fs::write(&artifact_path, code)?;
        info!(path = %artifact_path.display(), "Wrote final artifact");

        let report = match self.checks.evaluate(code).await {
            Ok(report) => report,
            Err(e) => {
                // An artifact is only left behind together with its summary.
                if let Err(remove_err) = fs::remove_file(&artifact_path) {
                    warn!(
                        path = %artifact_path.display(),
                        error = %remove_err,
                        "Failed to remove unchecked artifact"
                    );
                }
                return Err(e.into());
            }
        };
        let summary = Summary {
            files: vec![artifact_path.display().to_string()],
            status: RunStatus::from_report(&report),
        };

        fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
        info!(
            path = %summary_path.display(),
            status = %summary.status,
            "Wrote run summary"
        );

        Ok(PublishedRun {
            artifact_path,
            summary_path,
            summary,
            report,
        })
    }

    fn free_paths(&self, stamp: &str) -> (PathBuf, PathBuf) {
        let mut suffix = 0u32;
        loop {
            let tag = if suffix == 0 {
                stamp.to_string()
            } else {
                format!("{stamp}_{suffix}")
            };
            let artifact = self
                .output_dir
                .join(format!("output_{tag}.{}", self.extension));
            let summary = self.output_dir.join(format!("summary_{tag}.json"));

            if !artifact.exists() && !summary.exists() {
                return (artifact, summary);
            }
            suffix += 1;
        }
    }
}
