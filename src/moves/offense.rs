//! Offense move kinds
//!
//! One closed enum covers every attacker move. Each variant carries only the
//! content data that varies; the generic resolution algorithm dispatches on
//! the kind with exhaustive matching.

use crate::checks::{CheckDifficulty, CheckType};
use crate::gear::{AttackProfile, NaturalAttack};
use serde::{Deserialize, Serialize};

/// Firing posture for ranged attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangedMode {
    Fire,
    SkirmishAndFire,
    StandAndFire,
    AdvanceAndFire,
}

impl RangedMode {
    /// Difficulty stages added to the shot
    pub fn difficulty_stages(&self) -> i32 {
        match self {
            RangedMode::Fire => 0,
            RangedMode::SkirmishAndFire => 1,
            RangedMode::StandAndFire => -1,
            RangedMode::AdvanceAndFire => 1,
        }
    }
}

/// Secondary moves layered over a base attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinisherKind {
    StaggeringBlow,
    UnbalancingBlow,
    Takedown,
}

impl FinisherKind {
    pub fn check_type(&self) -> CheckType {
        match self {
            FinisherKind::StaggeringBlow => CheckType::StaggeringBlowCheck,
            FinisherKind::UnbalancingBlow => CheckType::UnbalancingBlowCheck,
            FinisherKind::Takedown => CheckType::TakedownCheck,
        }
    }

    pub fn difficulty(&self) -> CheckDifficulty {
        match self {
            FinisherKind::StaggeringBlow => CheckDifficulty::Hard,
            FinisherKind::UnbalancingBlow => CheckDifficulty::Hard,
            FinisherKind::Takedown => CheckDifficulty::VeryHard,
        }
    }
}

/// Every attacker move the engine resolves
#[derive(Debug, Clone, PartialEq)]
pub enum OffenseKind {
    /// Strike with the wielded melee weapon
    MeleeWeapon { attack: AttackProfile },
    /// Unarmed strike with a bodypart
    NaturalAttack { natural: NaturalAttack },
    /// Weapon strike at clinch range
    ClinchWeapon { attack: AttackProfile },
    /// Unarmed strike at clinch range
    ClinchNatural { natural: NaturalAttack },
    /// Shot from the wielded ranged weapon
    Ranged { attack: AttackProfile, mode: RangedMode },
    /// Offensive magic power
    MagicPower { power_name: String, attack: AttackProfile },
    GrappleInitiate,
    GrappleExtend,
    /// Twist a held limb inside an existing grapple
    GrappleWrench { attack: AttackProfile },
    /// Slow strangulation inside an existing grapple
    GrappleStrangle { attack: AttackProfile },
    /// Struggle free of a grapple holding the mover
    GrappleBreakout,
    /// Execution strike against a helpless target
    CoupDeGrace { attack: AttackProfile },
    /// Strike against a prone opponent
    DownedAttack { attack: AttackProfile },
}

impl OffenseKind {
    /// The damage profile, for kinds that carry one
    pub fn profile(&self) -> Option<&AttackProfile> {
        match self {
            OffenseKind::MeleeWeapon { attack }
            | OffenseKind::ClinchWeapon { attack }
            | OffenseKind::Ranged { attack, .. }
            | OffenseKind::MagicPower { attack, .. }
            | OffenseKind::GrappleWrench { attack }
            | OffenseKind::GrappleStrangle { attack }
            | OffenseKind::CoupDeGrace { attack }
            | OffenseKind::DownedAttack { attack } => Some(attack),
            OffenseKind::NaturalAttack { natural }
            | OffenseKind::ClinchNatural { natural } => Some(&natural.profile),
            OffenseKind::GrappleInitiate
            | OffenseKind::GrappleExtend
            | OffenseKind::GrappleBreakout => None,
        }
    }

    pub fn check_type(&self) -> CheckType {
        match self {
            OffenseKind::MeleeWeapon { .. }
            | OffenseKind::CoupDeGrace { .. }
            | OffenseKind::DownedAttack { .. } => CheckType::MeleeWeaponCheck,
            OffenseKind::NaturalAttack { .. } => CheckType::NaturalAttackCheck,
            OffenseKind::ClinchWeapon { .. } | OffenseKind::ClinchNatural { .. } => {
                CheckType::ClinchCheck
            }
            OffenseKind::Ranged { .. } => CheckType::RangedAttackCheck,
            OffenseKind::MagicPower { .. } => CheckType::MagicPowerCheck,
            OffenseKind::GrappleInitiate
            | OffenseKind::GrappleExtend
            | OffenseKind::GrappleWrench { .. }
            | OffenseKind::GrappleStrangle { .. } => CheckType::GrappleCheck,
            OffenseKind::GrappleBreakout => CheckType::BreakoutCheck,
        }
    }

    /// Difficulty of the attacker's check
    pub fn difficulty(&self) -> CheckDifficulty {
        match self {
            OffenseKind::Ranged { attack, mode } => {
                attack.difficulty.stage_up(mode.difficulty_stages())
            }
            // Striking a downed opponent is a stage easier.
            OffenseKind::DownedAttack { attack } => attack.difficulty.stage_down(1),
            // A coup de grace is not meaningfully contested.
            OffenseKind::CoupDeGrace { .. } => CheckDifficulty::Automatic,
            other => other
                .profile()
                .map(|profile| profile.difficulty)
                .unwrap_or(CheckDifficulty::Normal),
        }
    }

    /// Does this kind resolve at clinch range?
    pub fn is_clinch(&self) -> bool {
        matches!(
            self,
            OffenseKind::ClinchWeapon { .. } | OffenseKind::ClinchNatural { .. }
        )
    }

    /// Is this one of the grapple family of moves?
    pub fn is_grapple(&self) -> bool {
        matches!(
            self,
            OffenseKind::GrappleInitiate
                | OffenseKind::GrappleExtend
                | OffenseKind::GrappleWrench { .. }
                | OffenseKind::GrappleStrangle { .. }
                | OffenseKind::GrappleBreakout
        )
    }

    /// Does this kind require a wielded melee weapon?
    pub fn needs_melee_weapon(&self) -> bool {
        matches!(
            self,
            OffenseKind::MeleeWeapon { .. }
                | OffenseKind::ClinchWeapon { .. }
                | OffenseKind::CoupDeGrace { .. }
                | OffenseKind::DownedAttack { .. }
        )
    }

    /// Short display name
    pub fn name(&self) -> &str {
        match self {
            OffenseKind::MeleeWeapon { attack }
            | OffenseKind::ClinchWeapon { attack }
            | OffenseKind::Ranged { attack, .. }
            | OffenseKind::GrappleWrench { attack }
            | OffenseKind::GrappleStrangle { attack }
            | OffenseKind::CoupDeGrace { attack }
            | OffenseKind::DownedAttack { attack } => &attack.name,
            OffenseKind::NaturalAttack { natural }
            | OffenseKind::ClinchNatural { natural } => &natural.name,
            OffenseKind::MagicPower { power_name, .. } => power_name,
            OffenseKind::GrappleInitiate => "grapple",
            OffenseKind::GrappleExtend => "extend grapple",
            OffenseKind::GrappleBreakout => "break free",
        }
    }
}
