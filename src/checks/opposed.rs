//! Opposed outcome comparison
//!
//! Two checks, possibly at different nominal difficulties, reduce to a
//! winner and a margin. Every resolution path funnels through
//! `OpposedOutcome::compare`; no caller hand-rolls the bucketing.

use crate::checks::difficulty::CheckDifficulty;
use crate::checks::outcome::Outcome;
use serde::{Deserialize, Serialize};

/// Who won the opposed comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeDirection {
    /// The proponent (attacker) wins
    Proponent,
    /// The opponent (defender) wins
    Opponent,
    Stalemate,
}

/// How decisively the comparison was won
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum OpposedOutcomeDegree {
    None,
    Marginal,
    Minor,
    Moderate,
    Major,
    Total,
}

impl OpposedOutcomeDegree {
    /// Numeric weight used by damage formulas (None = 0 .. Total = 5)
    pub fn weight(&self) -> f64 {
        match self {
            OpposedOutcomeDegree::None => 0.0,
            OpposedOutcomeDegree::Marginal => 1.0,
            OpposedOutcomeDegree::Minor => 2.0,
            OpposedOutcomeDegree::Moderate => 3.0,
            OpposedOutcomeDegree::Major => 4.0,
            OpposedOutcomeDegree::Total => 5.0,
        }
    }
}

/// Result of comparing an attacker outcome against a defender outcome
///
/// Direction and degree are jointly determined by the inputs and are never
/// set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpposedOutcome {
    pub direction: OutcomeDirection,
    pub degree: OpposedOutcomeDegree,
}

impl OpposedOutcome {
    /// Compare two checks tested at possibly different difficulties
    ///
    /// When the defender was not tested (helpless defense) pass `None`: the
    /// direction then follows the attacker's own pass/fail and the degree
    /// derives from the attacker's margin alone.
    pub fn compare(
        attacker: Outcome,
        attacker_difficulty: CheckDifficulty,
        defender: Option<Outcome>,
        defender_difficulty: CheckDifficulty,
    ) -> OpposedOutcome {
        let Some(defender) = defender else {
            return Self::untested(attacker);
        };

        // The side tested at the harder difficulty gets credit for the
        // difficulty spread between the two checks.
        let spread = attacker_difficulty.rank() - defender_difficulty.rank();
        let net = (attacker.check_degrees() - defender.check_degrees()) + spread;

        let direction = match net {
            n if n > 0 => OutcomeDirection::Proponent,
            n if n < 0 => OutcomeDirection::Opponent,
            _ => OutcomeDirection::Stalemate,
        };

        OpposedOutcome {
            direction,
            degree: Self::bucket(net.unsigned_abs()),
        }
    }

    /// Degree bucketing thresholds (single source of truth)
    fn bucket(gap: u32) -> OpposedOutcomeDegree {
        match gap {
            0 => OpposedOutcomeDegree::None,
            1 => OpposedOutcomeDegree::Marginal,
            2 => OpposedOutcomeDegree::Minor,
            3 => OpposedOutcomeDegree::Moderate,
            4 | 5 => OpposedOutcomeDegree::Major,
            _ => OpposedOutcomeDegree::Total,
        }
    }

    /// Comparison against an untested (helpless) opponent
    fn untested(attacker: Outcome) -> OpposedOutcome {
        let direction = if attacker.is_pass() {
            OutcomeDirection::Proponent
        } else {
            OutcomeDirection::Opponent
        };
        let degree = match attacker.check_degrees().unsigned_abs() {
            1 => OpposedOutcomeDegree::Minor,
            2 => OpposedOutcomeDegree::Major,
            _ => OpposedOutcomeDegree::Total,
        };
        OpposedOutcome { direction, degree }
    }

    /// Did the proponent win?
    pub fn proponent_won(&self) -> bool {
        self.direction == OutcomeDirection::Proponent
    }
}
