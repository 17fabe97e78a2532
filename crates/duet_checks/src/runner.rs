//! Check runner: scratch file + three external checks.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::command::CommandRunner;
use crate::config::CheckConfig;
use crate::error::{ChecksError, ChecksResult};
use crate::report::{CheckKind, CheckOutcome, CheckReport};

/// Evaluates candidate code with the configured tools.
///
/// Results are never cached: evaluating the same text twice runs every
/// tool twice.
#[derive(Clone)]
pub struct CheckRunner {
    config: CheckConfig,
    runner: Arc<dyn CommandRunner>,
}

impl CheckRunner {
    pub fn new(config: CheckConfig, runner: impl CommandRunner + 'static) -> Self {
        Self::with_shared(config, Arc::new(runner))
    }

    pub fn with_shared(config: CheckConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Write `code` to the scratch file and run all three checks.
    pub async fn evaluate(&self, code: &str) -> ChecksResult<CheckReport> {
        self.write_scratch(code)?;

        let tests = self.run_check(CheckKind::Tests).await?;
        let lint = self.run_check(CheckKind::Lint).await?;
        let type_check = self.run_check(CheckKind::TypeCheck).await?;

        let report = CheckReport::new(tests, lint, type_check);
        info!(
            green = report.is_green(),
            checks = %report.brief(),
            duration_ms = report.total_duration_ms(),
            "Checks complete"
        );

        Ok(report)
    }

    fn write_scratch(&self, code: &str) -> ChecksResult<()> {
        let path = &self.config.scratch_file;
        let scratch_err = |source| ChecksError::ScratchWrite {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(scratch_err)?;
        }
        std::fs::write(path, code).map_err(scratch_err)?;

        debug!(path = %path.display(), bytes = code.len(), "Wrote scratch file");
        Ok(())
    }

    async fn run_check(&self, kind: CheckKind) -> ChecksResult<CheckOutcome> {
        let command = self.config.command(kind);
        let args = command.resolve_args(&self.config.scratch_file);
        debug!(check = %kind, command = %command.display(&self.config.scratch_file), "Running check");

        let start = Instant::now();
        match self.runner.run(&command.program, &args).await {
            Ok(output) if output.success() => Ok(CheckOutcome::pass(kind, output.duration_ms)),
            Ok(output) => {
                debug!(check = %kind, exit_code = ?output.exit_code, "Check failed");
                Ok(CheckOutcome::fail(
                    kind,
                    output.combined_output(),
                    output.duration_ms,
                ))
            }
            Err(ChecksError::Spawn { program, source }) => {
                warn!(check = %kind, %program, error = %source, "Check tool could not be launched");
                Ok(CheckOutcome::fail(
                    kind,
                    format!("Failed to launch {}: {}", program, source),
                    start.elapsed().as_millis() as u64,
                ))
            }
            Err(e) => Err(e),
        }
    }
}
