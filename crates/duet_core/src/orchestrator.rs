//! One complete run: review loop followed by publishing.

use tracing::info;

use crate::controller::{LoopOutcome, ReviewLoop};
use crate::error::CoreResult;
use crate::publisher::{PublishedRun, ResultPublisher, RunStatus, Summary};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: LoopOutcome,
    pub published: PublishedRun,
}

impl RunReport {
    pub fn summary(&self) -> &Summary {
        &self.published.summary
    }

    pub fn status(&self) -> RunStatus {
        self.published.summary.status
    }
}

pub struct Orchestrator {
    review: ReviewLoop,
    publisher: ResultPublisher,
}

impl Orchestrator {
    pub fn new(review: ReviewLoop, publisher: ResultPublisher) -> Self {
        Self { review, publisher }
    }

    /// Run the review loop for `task` and publish the arbitrated artifact.
    pub async fn run(&self, task: &str) -> CoreResult<RunReport> {
        let outcome = self.review.run(task).await?;
        let published = self.publisher.publish(&outcome.final_code).await?;

        info!(
            status = %published.summary.status,
            converged = outcome.converged,
            rounds = outcome.rounds_used(),
            artifact = %published.artifact_path.display(),
            "Run complete"
        );

        Ok(RunReport { outcome, published })
    }
}
