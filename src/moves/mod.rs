//! Combat moves: one attacker move and one defender move per exchange
//!
//! Moves are constructed fresh for each discrete attempt, consumed exactly
//! once by the resolution engine, then discarded. Stamina costs are computed
//! lazily once per instance and cached.

pub mod defense;
pub mod offense;

pub use defense::DefenseKind;
pub use offense::{FinisherKind, OffenseKind, RangedMode};

use crate::actor::Combatant;
use crate::checks::{CheckDifficulty, CheckType};
use crate::config::RuleConfiguration;
use crate::core::ActorId;
use crate::stamina::{relative_cost_multiplier, ExertionLevel};
use std::cell::OnceCell;

/// An attacker's committed move for one resolution step
#[derive(Debug, Clone)]
pub struct AttackMove {
    pub assailant: ActorId,
    pub target: ActorId,
    pub kind: OffenseKind,
    /// Optional secondary move layered over the base attack
    pub finisher: Option<FinisherKind>,
    /// Friendly exchanges (sparring) skip the vital-area bias
    pub friendly: bool,
    stamina_cost: OnceCell<f64>,
}

impl AttackMove {
    pub fn new(assailant: ActorId, target: ActorId, kind: OffenseKind) -> Self {
        Self {
            assailant,
            target,
            kind,
            finisher: None,
            friendly: false,
            stamina_cost: OnceCell::new(),
        }
    }

    pub fn with_finisher(mut self, finisher: FinisherKind) -> Self {
        self.finisher = Some(finisher);
        self
    }

    pub fn friendly(mut self) -> Self {
        self.friendly = true;
        self
    }

    pub fn check_type(&self) -> CheckType {
        self.kind.check_type()
    }

    pub fn difficulty(&self) -> CheckDifficulty {
        self.kind.difficulty()
    }

    /// Seconds before the mover can act again, pre-recovery
    pub fn base_delay(&self) -> f64 {
        self.kind
            .profile()
            .map(|profile| profile.base_delay)
            .unwrap_or(3.0)
    }

    pub fn exertion(&self) -> ExertionLevel {
        self.kind
            .profile()
            .map(|profile| profile.exertion)
            .unwrap_or(ExertionLevel::Heavy)
    }

    /// Recovery difficulty handed to the scheduler
    pub fn recovery(&self, success: bool) -> CheckDifficulty {
        match self.kind.profile() {
            Some(profile) => {
                if success {
                    profile.recovery_success
                } else {
                    profile.recovery_failure
                }
            }
            None => {
                if success {
                    CheckDifficulty::Easy
                } else {
                    CheckDifficulty::Hard
                }
            }
        }
    }

    /// Stamina cost for this move, computed once and cached
    pub fn stamina_cost(&self, actor: &Combatant, config: &RuleConfiguration) -> f64 {
        *self.stamina_cost.get_or_init(|| {
            let base = self
                .kind
                .profile()
                .map(|profile| profile.base_stamina_cost)
                .unwrap_or(4.0);
            let multiplier = match &self.kind {
                OffenseKind::Ranged { mode, .. } => {
                    let mode_factor = match mode {
                        RangedMode::SkirmishAndFire => config.skirmish_fire_stamina_multiplier,
                        _ => 1.0,
                    };
                    relative_cost_multiplier(actor.attributes.grace, config.grace_pivot)
                        * mode_factor
                }
                OffenseKind::MagicPower { .. } => {
                    relative_cost_multiplier(actor.attributes.power, config.power_pivot)
                }
                _ => relative_cost_multiplier(actor.attributes.strength, config.strength_pivot),
            };
            base * multiplier
        })
    }
}

/// A defender's committed response for one resolution step
///
/// Never resolved on its own; only as the passive counterpart inside an
/// attacker's resolution.
#[derive(Debug, Clone)]
pub struct DefenseMove {
    pub assailant: ActorId,
    pub kind: DefenseKind,
    /// Difficulty penalty when a desperate variant was chosen
    pub desperate_stage_ups: i32,
    stamina_cost: OnceCell<f64>,
}

impl DefenseMove {
    pub fn new(assailant: ActorId, kind: DefenseKind) -> Self {
        Self {
            assailant,
            kind,
            desperate_stage_ups: 0,
            stamina_cost: OnceCell::new(),
        }
    }

    pub fn helpless(assailant: ActorId) -> Self {
        Self::new(assailant, DefenseKind::Helpless)
    }

    pub fn too_exhausted(assailant: ActorId) -> Self {
        Self::new(assailant, DefenseKind::TooExhausted)
    }

    pub fn dodge(assailant: ActorId) -> Self {
        Self::new(assailant, DefenseKind::Dodge)
    }

    pub fn parry(assailant: ActorId) -> Self {
        Self::new(assailant, DefenseKind::Parry)
    }

    pub fn block(assailant: ActorId) -> Self {
        Self::new(assailant, DefenseKind::Block)
    }

    pub fn ward(assailant: ActorId) -> Self {
        Self::new(assailant, DefenseKind::Ward)
    }

    pub fn counter_grapple(assailant: ActorId) -> Self {
        Self::new(assailant, DefenseKind::CounterGrapple)
    }

    /// Mark this defense as a desperate variant
    pub fn desperate(mut self, stage_ups: i32) -> Self {
        self.desperate_stage_ups = stage_ups;
        self
    }

    pub fn exertion(&self) -> ExertionLevel {
        self.kind.exertion()
    }

    /// Stamina cost for this defense, computed once and cached
    pub fn stamina_cost(&self, actor: &Combatant, config: &RuleConfiguration) -> f64 {
        *self.stamina_cost.get_or_init(|| {
            let base = self.kind.base_stamina(config);
            let multiplier = match self.kind {
                DefenseKind::Dodge => {
                    relative_cost_multiplier(actor.attributes.grace, config.grace_pivot)
                }
                _ => relative_cost_multiplier(actor.attributes.strength, config.strength_pivot),
            };
            base * multiplier
        })
    }

    /// Driver hook invoked when this defense is spent; intentionally a no-op
    pub fn resolve_defense_used(&self) {}
}
