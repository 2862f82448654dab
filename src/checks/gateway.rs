//! Check gateway: the boundary to the dice engine
//!
//! The engine never rolls dice itself. Every probabilistic test goes through
//! the `CheckGateway` trait. `DiceGateway` is the seeded default; tests use
//! `ScriptedGateway` to force exact outcome sequences.

use crate::actor::Combatant;
use crate::checks::difficulty::CheckDifficulty;
use crate::checks::outcome::Outcome;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// The kinds of checks combat resolution can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckType {
    MeleeWeaponCheck,
    NaturalAttackCheck,
    ClinchCheck,
    RangedAttackCheck,
    MagicPowerCheck,
    GrappleCheck,
    BreakoutCheck,
    DodgeCheck,
    ParryCheck,
    BlockCheck,
    WardCheck,
    WardIgnoreCheck,
    CounterGrappleCheck,
    MeleeWeaponPenetrateCheck,
    DisarmCheck,
    StaggeringBlowCheck,
    UnbalancingBlowCheck,
    TakedownCheck,
}

/// A single probabilistic test against a difficulty
pub trait CheckGateway {
    /// Test `actor` at `difficulty`, applying a flat `bonus`
    fn check(
        &mut self,
        actor: &Combatant,
        check: CheckType,
        difficulty: CheckDifficulty,
        opponent: Option<&Combatant>,
        bonus: f64,
    ) -> Outcome;

    /// One roll evaluated against every difficulty on the ladder
    fn check_against_all_difficulties(
        &mut self,
        actor: &Combatant,
        check: CheckType,
        opponent: Option<&Combatant>,
        bonus: f64,
    ) -> BTreeMap<CheckDifficulty, Outcome>;

    /// One roll evaluated at two difficulties at once
    fn multi_difficulty_check(
        &mut self,
        actor: &Combatant,
        check: CheckType,
        first: CheckDifficulty,
        second: CheckDifficulty,
        opponent: Option<&Combatant>,
        bonus: f64,
    ) -> (Outcome, Outcome);
}

/// Default dice implementation backed by a seeded RNG
#[derive(Debug)]
pub struct DiceGateway {
    rng: StdRng,
}

impl DiceGateway {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn roll(&mut self) -> f64 {
        self.rng.gen_range(1..=100) as f64
    }

    fn outcome_for(
        actor: &Combatant,
        check: CheckType,
        difficulty: CheckDifficulty,
        bonus: f64,
        roll: f64,
    ) -> Outcome {
        let target = actor.skill(check) + bonus + difficulty.score_modifier();
        let margin = target - roll;
        match margin {
            m if m >= 40.0 => Outcome::MajorPass,
            m if m >= 15.0 => Outcome::Pass,
            m if m >= 0.0 => Outcome::MinorPass,
            m if m >= -15.0 => Outcome::MinorFail,
            m if m >= -40.0 => Outcome::Fail,
            _ => Outcome::MajorFail,
        }
    }
}

impl CheckGateway for DiceGateway {
    fn check(
        &mut self,
        actor: &Combatant,
        check: CheckType,
        difficulty: CheckDifficulty,
        _opponent: Option<&Combatant>,
        bonus: f64,
    ) -> Outcome {
        let roll = self.roll();
        Self::outcome_for(actor, check, difficulty, bonus, roll)
    }

    fn check_against_all_difficulties(
        &mut self,
        actor: &Combatant,
        check: CheckType,
        _opponent: Option<&Combatant>,
        bonus: f64,
    ) -> BTreeMap<CheckDifficulty, Outcome> {
        let roll = self.roll();
        CheckDifficulty::all()
            .into_iter()
            .map(|difficulty| {
                (
                    difficulty,
                    Self::outcome_for(actor, check, difficulty, bonus, roll),
                )
            })
            .collect()
    }

    fn multi_difficulty_check(
        &mut self,
        actor: &Combatant,
        check: CheckType,
        first: CheckDifficulty,
        second: CheckDifficulty,
        _opponent: Option<&Combatant>,
        bonus: f64,
    ) -> (Outcome, Outcome) {
        let roll = self.roll();
        (
            Self::outcome_for(actor, check, first, bonus, roll),
            Self::outcome_for(actor, check, second, bonus, roll),
        )
    }
}

/// Test gateway replaying a fixed outcome sequence
///
/// Pops the next scripted outcome for every check, in call order. Runs of
/// the same exchange with the same script are fully deterministic.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    queue: VecDeque<Outcome>,
    /// Record of (check, difficulty, bonus) actually requested
    pub log: Vec<(CheckType, CheckDifficulty, f64)>,
}

impl ScriptedGateway {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            queue: outcomes.into_iter().collect(),
            log: Vec::new(),
        }
    }

    fn next(&mut self) -> Outcome {
        // An exhausted script defaults to MinorFail rather than panicking so
        // tests can over-resolve without scripting every trailing check.
        self.queue.pop_front().unwrap_or(Outcome::MinorFail)
    }
}

impl CheckGateway for ScriptedGateway {
    fn check(
        &mut self,
        _actor: &Combatant,
        check: CheckType,
        difficulty: CheckDifficulty,
        _opponent: Option<&Combatant>,
        bonus: f64,
    ) -> Outcome {
        self.log.push((check, difficulty, bonus));
        if difficulty == CheckDifficulty::Automatic {
            return self.next().max(Outcome::MinorPass);
        }
        if difficulty == CheckDifficulty::Impossible {
            return self.next().min(Outcome::MinorFail);
        }
        self.next()
    }

    fn check_against_all_difficulties(
        &mut self,
        _actor: &Combatant,
        check: CheckType,
        _opponent: Option<&Combatant>,
        bonus: f64,
    ) -> BTreeMap<CheckDifficulty, Outcome> {
        let outcome = self.next();
        self.log.push((check, CheckDifficulty::Normal, bonus));
        CheckDifficulty::all()
            .into_iter()
            .map(|difficulty| (difficulty, outcome))
            .collect()
    }

    fn multi_difficulty_check(
        &mut self,
        _actor: &Combatant,
        check: CheckType,
        first: CheckDifficulty,
        second: CheckDifficulty,
        _opponent: Option<&Combatant>,
        bonus: f64,
    ) -> (Outcome, Outcome) {
        self.log.push((check, first, bonus));
        self.log.push((check, second, bonus));
        (self.next(), self.next())
    }
}
