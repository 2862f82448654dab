//! Attack profiles: the content-data shape the engine consumes
//!
//! The engine never hard-codes what an attack does. Every strike, shot,
//! wrench, or power carries one of these profiles, supplied by content.

use crate::actor::body::{Alignment, BodyOrientation};
use crate::checks::CheckDifficulty;
use crate::damage::DamageType;
use crate::formula::Formula;
use crate::stamina::ExertionLevel;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manufacturing quality of an item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ItemQuality {
    Terrible,
    Poor,
    #[default]
    Standard,
    Good,
    Excellent,
    Masterwork,
}

impl ItemQuality {
    /// Multiplier fed to damage formulas as the `quality` parameter
    pub fn factor(&self) -> f64 {
        match self {
            ItemQuality::Terrible => 0.5,
            ItemQuality::Poor => 0.75,
            ItemQuality::Standard => 1.0,
            ItemQuality::Good => 1.15,
            ItemQuality::Excellent => 1.3,
            ItemQuality::Masterwork => 1.5,
        }
    }
}

/// Declared shape of a single attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub name: String,
    /// Difficulty of the attacker's own check
    pub difficulty: CheckDifficulty,
    /// Base difficulty any response is tested at
    pub defense_difficulty: CheckDifficulty,
    /// Base angle of incidence in radians
    pub base_angle: f64,
    pub damage_type: DamageType,
    pub damage_formula: Formula,
    pub pain_formula: Formula,
    pub stun_formula: Formula,
    pub base_stamina_cost: f64,
    pub exertion: ExertionLevel,
    /// Seconds before the mover can act again, pre-recovery
    pub base_delay: f64,
    pub recovery_success: CheckDifficulty,
    pub recovery_failure: CheckDifficulty,
    /// Vertical band the attack swings through
    pub orientation: BodyOrientation,
    /// Side the attack arrives from
    pub alignment: Alignment,
}

impl AttackProfile {
    fn base(name: &str, damage_type: DamageType, damage: &str, pain: &str, stun: &str) -> Self {
        Self {
            name: name.to_string(),
            difficulty: CheckDifficulty::Normal,
            defense_difficulty: CheckDifficulty::Normal,
            base_angle: PI / 2.0,
            damage_type,
            damage_formula: Formula::parse(damage).expect("static formula"),
            pain_formula: Formula::parse(pain).expect("static formula"),
            stun_formula: Formula::parse(stun).expect("static formula"),
            base_stamina_cost: 4.0,
            exertion: ExertionLevel::Heavy,
            base_delay: 3.0,
            recovery_success: CheckDifficulty::Easy,
            recovery_failure: CheckDifficulty::Hard,
            orientation: BodyOrientation::High,
            alignment: Alignment::Right,
        }
    }

    /// Common profile: one-handed sword slash
    pub fn sword_slash() -> Self {
        Self::base(
            "slash",
            DamageType::Slashing,
            "(degree + 2) * quality * 2",
            "(degree + 1) * quality * 2",
            "degree * quality",
        )
    }

    /// Common profile: sword thrust
    pub fn sword_thrust() -> Self {
        Self {
            base_angle: PI / 3.0,
            orientation: BodyOrientation::Centre,
            alignment: Alignment::Centre,
            ..Self::base(
                "thrust",
                DamageType::Piercing,
                "(degree + 3) * quality * 2",
                "(degree + 1) * quality",
                "degree * quality / 2",
            )
        }
    }

    /// Common profile: mace swing
    pub fn mace_swing() -> Self {
        Self {
            exertion: ExertionLevel::VeryHeavy,
            base_stamina_cost: 6.0,
            base_delay: 4.0,
            ..Self::base(
                "swing",
                DamageType::Crushing,
                "(degree + 2) * quality * 2.5",
                "(degree + 2) * quality",
                "(degree + 2) * quality",
            )
        }
    }

    /// Common profile: unarmed punch
    pub fn punch() -> Self {
        Self {
            difficulty: CheckDifficulty::Easy,
            base_stamina_cost: 2.0,
            exertion: ExertionLevel::Moderate,
            base_delay: 2.0,
            orientation: BodyOrientation::High,
            ..Self::base(
                "punch",
                DamageType::UnarmedCrushing,
                "(degree + 1) * quality",
                "(degree + 1) * quality",
                "degree * quality",
            )
        }
    }

    /// Common profile: unarmed kick
    pub fn kick() -> Self {
        Self {
            base_stamina_cost: 3.0,
            exertion: ExertionLevel::Heavy,
            orientation: BodyOrientation::Low,
            ..Self::base(
                "kick",
                DamageType::UnarmedCrushing,
                "(degree + 2) * quality",
                "(degree + 1) * quality",
                "degree * quality",
            )
        }
    }

    /// Common profile: bow shot
    pub fn bow_shot() -> Self {
        Self {
            base_angle: PI / 4.0,
            base_stamina_cost: 3.0,
            exertion: ExertionLevel::Moderate,
            base_delay: 4.0,
            orientation: BodyOrientation::High,
            alignment: Alignment::Centre,
            ..Self::base(
                "shot",
                DamageType::Ballistic,
                "(degree + 3) * quality * 2",
                "(degree + 1) * quality",
                "degree * quality / 2",
            )
        }
    }

    /// Common profile: joint wrench inside a grapple
    pub fn wrench() -> Self {
        Self {
            base_angle: PI / 2.0,
            difficulty: CheckDifficulty::Hard,
            base_stamina_cost: 5.0,
            exertion: ExertionLevel::VeryHeavy,
            orientation: BodyOrientation::Centre,
            alignment: Alignment::Centre,
            ..Self::base(
                "wrench",
                DamageType::Wrenching,
                "(degree + 1) * quality * 2",
                "(degree + 2) * quality * 2",
                "degree * quality",
            )
        }
    }

    /// Common profile: slow strangulation inside a grapple
    pub fn strangle() -> Self {
        Self {
            difficulty: CheckDifficulty::Hard,
            base_stamina_cost: 4.0,
            exertion: ExertionLevel::Heavy,
            orientation: BodyOrientation::Highest,
            alignment: Alignment::Centre,
            ..Self::base(
                "strangle",
                DamageType::Hypoxia,
                "(degree + 1) * quality",
                "degree * quality",
                "(degree + 2) * quality",
            )
        }
    }

    /// Common profile: magic force bolt
    pub fn force_bolt() -> Self {
        Self {
            difficulty: CheckDifficulty::Hard,
            base_angle: PI / 3.0,
            base_stamina_cost: 5.0,
            exertion: ExertionLevel::Heavy,
            alignment: Alignment::Centre,
            ..Self::base(
                "force bolt",
                DamageType::Sonic,
                "(degree + 2) * quality * 2",
                "(degree + 1) * quality",
                "(degree + 1) * quality",
            )
        }
    }
}
