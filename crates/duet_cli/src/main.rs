//! duet CLI - Main entry point.
//!
//! Settings are read from the environment, after loading a `.env` file from
//! the working directory (or a parent) when one exists.
//!
//! Exit codes:
//! - 0: Run finished, summary green or red
//! - 1: Usage error or fatal error

use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use duet_agents::{LlmAgent, LlmProvider};
use duet_checks::{CheckRunner, ProcessRunner};
use duet_core::prompts::{ARBITRATOR_SYSTEM_PROMPT, CODER_SYSTEM_PROMPT};
use duet_core::{AgentSet, Orchestrator, ResultPublisher, ReviewLoop, RunReport};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod args;

use args::Cli;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
}

#[tokio::main]
async fn main() -> ExitCode {
    // Variables already set in the environment win over `.env`.
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout; anything else is a usage error.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCodes::SUCCESS,
                _ => ExitCodes::FAILURE,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(report) => {
            println!("Status:   {}", report.status());
            println!("Rounds:   {}", report.outcome.rounds_used());
            println!("Artifact: {}", report.published.artifact_path.display());
            println!("Summary:  {}", report.published.summary_path.display());
            ExitCode::from(ExitCodes::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(ExitCodes::FAILURE)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("duet=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duet=info,warn"))
    };

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

async fn run(cli: Cli) -> anyhow::Result<RunReport> {
    let agents = AgentSet::new(
        LlmAgent::from_env(
            "ChatGPT",
            LlmProvider::OpenAI,
            cli.model_a.clone(),
            CODER_SYSTEM_PROMPT,
        ),
        LlmAgent::from_env(
            "Claude",
            LlmProvider::Anthropic,
            cli.model_b.clone(),
            CODER_SYSTEM_PROMPT,
        ),
        LlmAgent::from_env(
            "Arbitrator",
            LlmProvider::OpenAI,
            cli.model_a.clone(),
            ARBITRATOR_SYSTEM_PROMPT,
        ),
    );

    let checks = CheckRunner::new(cli.check_config(), ProcessRunner::new());
    let review = ReviewLoop::new(agents, checks.clone(), cli.loop_config());
    let publisher = ResultPublisher::new(&cli.output_dir, checks);

    info!(
        max_rounds = cli.max_rounds,
        output_dir = %cli.output_dir.display(),
        "Starting duet run"
    );

    Orchestrator::new(review, publisher)
        .run(&cli.task)
        .await
        .context("duet run failed")
}
