//! Review loop controller.
//!
//! Drives generation, the bounded cross-review rounds and arbitration.
//! Calls that do not depend on each other (the two generations, the two
//! reviews, the two revisions, the two fix-ups) are joined; validation is
//! sequential because both candidates share one scratch file.

use std::sync::Arc;

use duet_agents::Agent;
use duet_checks::CheckRunner;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::candidate::{Candidate, Owner};
use crate::code::extract_code_block;
use crate::config::LoopConfig;
use crate::error::CoreResult;
use crate::phase::LoopPhase;
use crate::prompts;

/// The three agents taking part in a run.
#[derive(Clone)]
pub struct AgentSet {
    pub model_a: Arc<dyn Agent>,
    pub model_b: Arc<dyn Agent>,
    pub arbitrator: Arc<dyn Agent>,
}

impl AgentSet {
    pub fn new(
        model_a: impl Agent + 'static,
        model_b: impl Agent + 'static,
        arbitrator: impl Agent + 'static,
    ) -> Self {
        Self {
            model_a: Arc::new(model_a),
            model_b: Arc::new(model_b),
            arbitrator: Arc::new(arbitrator),
        }
    }

    /// The coding agent that owns `owner`'s candidate.
    pub fn coder(&self, owner: Owner) -> &dyn Agent {
        match owner {
            Owner::A => self.model_a.as_ref(),
            Owner::B => self.model_b.as_ref(),
        }
    }
}

/// What happened in one executed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub green_a: bool,
    pub green_b: bool,
    /// Candidates that received a check-failure prompt after validation
    pub fixups: Vec<Owner>,
}

impl RoundRecord {
    pub fn converged(&self) -> bool {
        self.green_a && self.green_b
    }
}

/// Result of a complete loop, before publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopOutcome {
    /// Arbitrator's reply, the artifact to publish
    pub final_code: String,
    pub candidate_a: Candidate,
    pub candidate_b: Candidate,
    pub rounds: Vec<RoundRecord>,
    /// Both candidates were green at the end of some round
    pub converged: bool,
    /// Phases visited, in order
    pub phases: Vec<LoopPhase>,
}

impl LoopOutcome {
    pub fn rounds_used(&self) -> u32 {
        self.rounds.len() as u32
    }
}

/// Phase bookkeeping for one run.
struct PhaseLog {
    phases: Vec<LoopPhase>,
}

impl PhaseLog {
    fn start() -> Self {
        info!(phase = %LoopPhase::Generating, "Entering phase");
        Self {
            phases: vec![LoopPhase::Generating],
        }
    }

    fn enter(&mut self, next: LoopPhase) {
        if let Some(current) = self.phases.last() {
            debug_assert!(
                current.can_transition_to(next),
                "invalid phase transition {current} -> {next}"
            );
        }
        debug!(phase = %next, "Entering phase");
        self.phases.push(next);
    }
}

/// The cross-review loop.
pub struct ReviewLoop {
    agents: AgentSet,
    checks: CheckRunner,
    config: LoopConfig,
}

impl ReviewLoop {
    pub fn new(agents: AgentSet, checks: CheckRunner, config: LoopConfig) -> Self {
        Self {
            agents,
            checks,
            config,
        }
    }

    /// Run generation, up to `max_rounds` review rounds, and arbitration.
    ///
    /// Any agent or scratch-file failure aborts the run. Failing checks do
    /// not: they are fed back to the owning agent.
    pub async fn run(&self, task: &str) -> CoreResult<LoopOutcome> {
        info!(
            max_rounds = self.config.max_rounds,
            task_chars = task.len(),
            "Starting review loop"
        );
        let mut phases = PhaseLog::start();

        let (mut a, mut b) = self.generate(task).await?;

        let mut rounds = Vec::new();
        let mut converged = false;

        for round in 0..self.config.max_rounds {
            info!(round, "Starting review round");

            phases.enter(LoopPhase::Reviewing);
            let (feedback_a, feedback_b) = self.cross_review(&a, &b).await?;

            phases.enter(LoopPhase::Correcting);
            self.correct(&mut a, &mut b, &feedback_a, &feedback_b).await?;

            phases.enter(LoopPhase::Validating);
            a.record_report(self.checks.evaluate(&a.code).await?);
            b.record_report(self.checks.evaluate(&b.code).await?);

            let mut record = RoundRecord {
                round,
                green_a: a.is_green(),
                green_b: b.is_green(),
                fixups: Vec::new(),
            };
            info!(
                round,
                green_a = record.green_a,
                green_b = record.green_b,
                "Round validated"
            );

            if record.converged() {
                phases.enter(LoopPhase::Converged);
                info!(round, "Both candidates green, stopping early");
                rounds.push(record);
                converged = true;
                break;
            }

            phases.enter(LoopPhase::NextRound);
            record.fixups = self.fix_failures(&mut a, &mut b).await?;
            rounds.push(record);
        }

        if !converged {
            info!(rounds = rounds.len(), "Review rounds exhausted without convergence");
        }

        phases.enter(LoopPhase::Arbitrating);
        let final_code = self.arbitrate(&a, &b).await?;

        phases.enter(LoopPhase::Done);
        info!(
            rounds = rounds.len(),
            converged,
            final_chars = final_code.len(),
            "Review loop finished"
        );

        Ok(LoopOutcome {
            final_code,
            candidate_a: a,
            candidate_b: b,
            rounds,
            converged,
            phases: phases.phases,
        })
    }

    async fn generate(&self, task: &str) -> CoreResult<(Candidate, Candidate)> {
        let prompt = prompts::generation(task);
        let (code_a, code_b) = tokio::try_join!(
            self.agents.model_a.invoke(&prompt),
            self.agents.model_b.invoke(&prompt),
        )?;

        Ok((
            Candidate::new(Owner::A, self.code_from(code_a)),
            Candidate::new(Owner::B, self.code_from(code_b)),
        ))
    }

    /// B reviews A's code and A reviews B's code.
    async fn cross_review(&self, a: &Candidate, b: &Candidate) -> CoreResult<(String, String)> {
        let review_a = prompts::review(&a.code);
        let review_b = prompts::review(&b.code);

        let feedback = tokio::try_join!(
            self.agents.coder(a.owner.reviewer()).invoke(&review_a),
            self.agents.coder(b.owner.reviewer()).invoke(&review_b),
        )?;
        Ok(feedback)
    }

    /// Each agent revises its own candidate with the feedback it received.
    async fn correct(
        &self,
        a: &mut Candidate,
        b: &mut Candidate,
        feedback_a: &str,
        feedback_b: &str,
    ) -> CoreResult<()> {
        let revise_a = prompts::revise(&a.code, feedback_a);
        let revise_b = prompts::revise(&b.code, feedback_b);

        let (code_a, code_b) = tokio::try_join!(
            self.agents.coder(a.owner).invoke(&revise_a),
            self.agents.coder(b.owner).invoke(&revise_b),
        )?;

        a.replace(self.code_from(code_a));
        b.replace(self.code_from(code_b));
        Ok(())
    }

    /// Send each failing candidate its own check log; returns who was fixed.
    async fn fix_failures(&self, a: &mut Candidate, b: &mut Candidate) -> CoreResult<Vec<Owner>> {
        let (fixed_a, fixed_b) = tokio::try_join!(self.fix_up(a), self.fix_up(b))?;

        let mut fixed = Vec::new();
        if let Some(code) = fixed_a {
            a.replace(code);
            fixed.push(Owner::A);
        }
        if let Some(code) = fixed_b {
            b.replace(code);
            fixed.push(Owner::B);
        }
        Ok(fixed)
    }

    async fn fix_up(&self, candidate: &Candidate) -> CoreResult<Option<String>> {
        let Some(log) = candidate.failure_log() else {
            return Ok(None);
        };

        debug!(owner = %candidate.owner, "Sending check failures to owner");
        let reply = self
            .agents
            .coder(candidate.owner)
            .invoke(&prompts::check_failure(&candidate.code, &log))
            .await?;
        Ok(Some(self.code_from(reply)))
    }

    async fn arbitrate(&self, a: &Candidate, b: &Candidate) -> CoreResult<String> {
        let prompt = prompts::arbitration(
            self.agents.model_a.name(),
            &a.code,
            self.agents.model_b.name(),
            &b.code,
        );
        let reply = self.agents.arbitrator.invoke(&prompt).await?;
        Ok(self.code_from(reply))
    }

    fn code_from(&self, reply: String) -> String {
        if self.config.extract_code {
            extract_code_block(&reply)
        } else {
            reply
        }
    }
}
