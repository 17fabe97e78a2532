//! Review loop configuration.

use serde::{Deserialize, Serialize};

/// Default number of review rounds.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Upper bound on review/correct/validate rounds
    pub max_rounds: u32,
    /// Reduce code replies to their first fenced block
    pub extract_code: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            extract_code: false,
        }
    }
}

impl LoopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_extract_code(mut self, enabled: bool) -> Self {
        self.extract_code = enabled;
        self
    }
}
