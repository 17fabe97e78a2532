//! # duet_core
//!
//! The cross-review loop for duet.
//!
//! Two coding agents each write a candidate solution for a task. For a
//! bounded number of rounds they review each other's code, revise their own,
//! and have it checked by the test, lint and type tools. An arbitrator then
//! picks the final artifact, which the publisher writes out together with a
//! `green`/`red` summary.
//!
//! ```text
//! task ──▶ generate A ─┐                         ┌─▶ arbitrate ──▶ publish
//!      └─▶ generate B ─┴─▶ [review ▶ revise ▶ check]×N
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use duet_core::{AgentSet, LoopConfig, Orchestrator, ResultPublisher, ReviewLoop};
//!
//! let review = ReviewLoop::new(agents, checks.clone(), LoopConfig::default());
//! let publisher = ResultPublisher::new("output", checks);
//! let report = Orchestrator::new(review, publisher).run("print a table of squares").await?;
//! println!("{}", report.status());
//! ```

pub mod candidate;
pub mod code;
pub mod config;
pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod phase;
pub mod prompts;
pub mod publisher;

pub use candidate::{Candidate, Owner};
pub use code::extract_code_block;
pub use config::LoopConfig;
pub use controller::{AgentSet, LoopOutcome, ReviewLoop, RoundRecord};
pub use error::{CoreError, CoreResult};
pub use orchestrator::{Orchestrator, RunReport};
pub use phase::LoopPhase;
pub use publisher::{PublishedRun, ResultPublisher, RunStatus, Summary};
