//! Review loop phases.

use serde::{Deserialize, Serialize};

/// Where a run currently is.
///
/// `Generating -> Reviewing -> Correcting -> Validating -> (Converged | NextRound)
/// -> Arbitrating -> Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPhase {
    Generating,
    Reviewing,
    Correcting,
    Validating,
    Converged,
    NextRound,
    Arbitrating,
    Done,
}

impl LoopPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generating => "generating",
            Self::Reviewing => "reviewing",
            Self::Correcting => "correcting",
            Self::Validating => "validating",
            Self::Converged => "converged",
            Self::NextRound => "next_round",
            Self::Arbitrating => "arbitrating",
            Self::Done => "done",
        }
    }

    /// Whether `next` may follow this phase.
    pub fn can_transition_to(&self, next: LoopPhase) -> bool {
        use LoopPhase::*;
        matches!(
            (self, next),
            (Generating, Reviewing)
                | (Generating, Arbitrating)
                | (Reviewing, Correcting)
                | (Correcting, Validating)
                | (Validating, Converged)
                | (Validating, NextRound)
                | (NextRound, Reviewing)
                | (NextRound, Arbitrating)
                | (Converged, Arbitrating)
                | (Arbitrating, Done)
        )
    }
}

impl std::fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cycle_transitions() {
        assert!(LoopPhase::Generating.can_transition_to(LoopPhase::Reviewing));
        assert!(LoopPhase::Validating.can_transition_to(LoopPhase::Converged));
        assert!(LoopPhase::NextRound.can_transition_to(LoopPhase::Reviewing));
        assert!(LoopPhase::Converged.can_transition_to(LoopPhase::Arbitrating));
    }

    #[test]
    fn test_no_skipping_validation() {
        assert!(!LoopPhase::Correcting.can_transition_to(LoopPhase::Converged));
        assert!(!LoopPhase::Reviewing.can_transition_to(LoopPhase::Arbitrating));
        assert!(!LoopPhase::Done.can_transition_to(LoopPhase::Generating));
    }

    #[test]
    fn test_zero_rounds_goes_straight_to_arbitration() {
        assert!(LoopPhase::Generating.can_transition_to(LoopPhase::Arbitrating));
    }
}
