//! # duet_checks
//!
//! Quality checks for candidate code.
//!
//! A [`CheckRunner`] writes a candidate to a scratch file and runs three
//! external tools against it: a test runner, a linter and a type checker.
//! All three always run, so one call yields the full diagnostics.
//!
//! # Example
//!
//! ```rust,no_run
//! use duet_checks::{CheckConfig, CheckRunner, ProcessRunner};
//!
//! # async fn demo() -> duet_checks::ChecksResult<()> {
//! let checks = CheckRunner::new(CheckConfig::default(), ProcessRunner::new());
//! let report = checks.evaluate("def run_task(n: int) -> list[int]: ...").await?;
//!
//! if !report.is_green() {
//!     println!("{}", report.failure_log().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod mock;
pub mod report;
pub mod runner;

pub use command::{CommandOutput, CommandRunner, ProcessRunner};
pub use config::{CheckCommand, CheckConfig, FILE_PLACEHOLDER};
pub use error::{ChecksError, ChecksResult};
pub use mock::{CapturedCall, MockResponse, MockRunner};
pub use report::{CheckKind, CheckOutcome, CheckReport};
pub use runner::CheckRunner;
