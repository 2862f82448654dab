//! The uniform result contract every resolution returns

use crate::checks::{CheckDifficulty, Outcome};
use crate::effects::EffectDelta;
use crate::wounds::Wound;
use serde::{Deserialize, Serialize};

/// Outcome of one resolved combat move
///
/// Immutable value handed back to the turn driver. `recovery_difficulty` is
/// the sole input the external scheduler needs to compute the mover's next
/// eligible action time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatMoveResult {
    pub move_was_successful: bool,
    /// None only for zero-effect results where no check was rolled
    pub attacker_outcome: Option<Outcome>,
    /// None when the defender was not tested (helpless)
    pub defender_outcome: Option<Outcome>,
    /// The move was fully negated by a ward
    pub ward_succeeded: bool,
    pub recovery_difficulty: CheckDifficulty,
    pub wounds_caused: Vec<Wound>,
    pub self_wounds_caused: Vec<Wound>,
}

impl CombatMoveResult {
    /// Zero-effect result for gameplay no-ops (invalid target, empty weapon)
    ///
    /// Not an error: the caller inspects `move_was_successful` rather than
    /// catching anything.
    pub fn irrelevant() -> Self {
        Self {
            move_was_successful: false,
            attacker_outcome: None,
            defender_outcome: None,
            ward_succeeded: false,
            recovery_difficulty: CheckDifficulty::Automatic,
            wounds_caused: Vec::new(),
            self_wounds_caused: Vec::new(),
        }
    }

    pub fn caused_any_wounds(&self) -> bool {
        !self.wounds_caused.is_empty() || !self.self_wounds_caused.is_empty()
    }
}

/// A resolution result plus its isolated side effects
#[derive(Debug, Clone)]
pub struct ResolvedExchange {
    pub result: CombatMoveResult,
    /// Effect-store and scheduler side effects, applied in one step
    pub deltas: Vec<EffectDelta>,
    /// Result of a free counter-attack spawned by a successful ward
    pub counter_attack: Option<Box<CombatMoveResult>>,
}

impl ResolvedExchange {
    pub fn new(result: CombatMoveResult) -> Self {
        Self {
            result,
            deltas: Vec::new(),
            counter_attack: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irrelevant_is_zero_effect() {
        let result = CombatMoveResult::irrelevant();
        assert!(!result.move_was_successful);
        assert!(result.attacker_outcome.is_none());
        assert!(!result.caused_any_wounds());
        assert_eq!(result.recovery_difficulty, CheckDifficulty::Automatic);
    }

    #[test]
    fn test_result_serializes_round_trip() {
        let result = CombatMoveResult {
            move_was_successful: true,
            attacker_outcome: Some(Outcome::Pass),
            defender_outcome: Some(Outcome::MinorFail),
            ward_succeeded: false,
            recovery_difficulty: CheckDifficulty::Easy,
            wounds_caused: Vec::new(),
            self_wounds_caused: Vec::new(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: CombatMoveResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
