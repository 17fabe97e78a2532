//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use duet_checks::CheckConfig;
use duet_core::config::DEFAULT_MAX_ROUNDS;
use duet_core::LoopConfig;

/// duet - two coding agents review each other's code
#[derive(Parser, Debug)]
#[command(name = "duet")]
#[command(version, about = "duet - two coding agents review each other's code")]
#[command(long_about = r#"
duet hands one task to two coding agents. Each writes a solution, reviews
the other's, revises its own and has it checked with pytest, ruff and mypy.
After at most --max-rounds rounds an arbitrator picks the final code.

OUTPUT:
  <output-dir>/output_<timestamp>.py     final artifact
  <output-dir>/summary_<timestamp>.json  {"files": [...], "status": "green"|"red"}

ENVIRONMENT:
  OPENAI_API_KEY     model A and the arbitrator
  ANTHROPIC_API_KEY  model B
  RUST_LOG           log filter

EXIT CODES:
  0 - Run finished (green or red)
  1 - Usage error or fatal error
"#)]
pub struct Cli {
    /// Natural-language task for both agents
    #[arg(allow_hyphen_values = true)]
    pub task: String,

    /// Maximum number of review rounds
    #[arg(long, env = "DUET_MAX_ROUNDS", default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: u32,

    /// Directory for the artifact and summary
    #[arg(long, env = "DUET_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// File the checks run against
    #[arg(long, env = "DUET_SCRATCH_FILE", default_value = "workspace/temp.py")]
    pub scratch_file: PathBuf,

    /// Model for agent A (OpenAI)
    #[arg(long, env = "DUET_MODEL_A")]
    pub model_a: Option<String>,

    /// Model for agent B (Anthropic)
    #[arg(long, env = "DUET_MODEL_B")]
    pub model_b: Option<String>,

    /// Keep only the first fenced code block of each code reply
    #[arg(long)]
    pub extract_code: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig::new()
            .with_max_rounds(self.max_rounds)
            .with_extract_code(self.extract_code)
    }

    pub fn check_config(&self) -> CheckConfig {
        CheckConfig::new().with_scratch_file(&self.scratch_file)
    }
}
