//! Rule configuration
//!
//! Every tunable the resolution engine consults lives here, constructed once
//! at startup and passed by reference. There is no global mutable state; a
//! test injects whatever values it needs.

use crate::checks::CheckDifficulty;
use crate::core::Result;
use serde::{Deserialize, Serialize};

/// Stamina costs for defensive moves, before context multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefenseStaminaCosts {
    pub dodge: f64,
    pub parry: f64,
    pub block: f64,
    pub ward: f64,
    pub counter_grapple: f64,
}

impl Default for DefenseStaminaCosts {
    fn default() -> Self {
        Self {
            dodge: 3.0,
            parry: 2.0,
            block: 1.5,
            ward: 2.0,
            counter_grapple: 3.0,
        }
    }
}

/// Finisher secondary-check tuning
///
/// The sign convention for the external bonus is content data, not engine
/// logic: `bonus_favors_attacker` decides which side the bonus helps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinisherRules {
    pub external_bonus: f64,
    pub bonus_favors_attacker: bool,
}

impl Default for FinisherRules {
    fn default() -> Self {
        Self {
            external_bonus: 10.0,
            bonus_favors_attacker: true,
        }
    }
}

/// Complete rule configuration for the resolution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfiguration {
    /// Master switch for the entire self-damage branch
    pub weapons_take_damage: bool,
    /// May a total parry disarm the attacker outright?
    pub disarm_on_total_parry: bool,
    /// How long a disarmed weapon resists being picked back up
    pub disarm_no_pickup_seconds: f64,
    /// Offensive-advantage penalty applied instead when disarm is forbidden
    pub forbidden_disarm_advantage_penalty: f64,
    /// Offensive-advantage bonus granted by a perfect dodge
    pub perfect_dodge_offensive_advantage: f64,
    /// Chance a major-fail dodge drops the defender prone
    pub dodge_fall_chance: f64,
    /// Weight multiplier for vital bodyparts against helpless targets
    pub vital_bias: f64,
    /// Difficulty stages per step of reach advantage in a ward
    pub ward_reach_stage_per_step: i32,
    /// Whether a successful ward may convert into a free counter-attack
    pub ward_counter_attacks: bool,
    /// Lifetime of the ward-beaten marker effect
    pub ward_beaten_seconds: f64,
    /// Stagger effect duration from a staggering blow
    pub stagger_seconds: f64,
    /// Extra scheduler stun window imposed by finishers
    pub stun_window_seconds: f64,
    /// Defensive-advantage penalty from an unbalancing blow
    pub unbalance_defensive_penalty: f64,
    /// Damage multiplier for a coup de grace
    pub coup_de_grace_multiplier: f64,
    /// Exhaustion-immunity window granted by a second wind
    pub second_wind_immunity_seconds: f64,
    /// Strength rating at which weapon-move stamina costs are unscaled
    pub strength_pivot: f64,
    /// Grace rating at which dodge stamina costs are unscaled
    pub grace_pivot: f64,
    /// Power rating at which magic-move stamina costs are unscaled
    pub power_pivot: f64,
    /// Stamina multiplier for skirmish-and-fire ranged moves
    pub skirmish_fire_stamina_multiplier: f64,
    /// Recovery difficulty for the too-exhausted fallback
    pub exhausted_recovery: CheckDifficulty,
    pub defense_stamina: DefenseStaminaCosts,
    pub finisher: FinisherRules,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self {
            weapons_take_damage: true,
            disarm_on_total_parry: true,
            disarm_no_pickup_seconds: 10.0,
            forbidden_disarm_advantage_penalty: 15.0,
            perfect_dodge_offensive_advantage: 10.0,
            dodge_fall_chance: 0.25,
            vital_bias: 3.0,
            ward_reach_stage_per_step: 1,
            ward_counter_attacks: true,
            ward_beaten_seconds: 15.0,
            stagger_seconds: 6.0,
            stun_window_seconds: 4.0,
            unbalance_defensive_penalty: 15.0,
            coup_de_grace_multiplier: 5.0,
            second_wind_immunity_seconds: 120.0,
            strength_pivot: 50.0,
            grace_pivot: 50.0,
            power_pivot: 50.0,
            skirmish_fire_stamina_multiplier: 1.5,
            exhausted_recovery: CheckDifficulty::Insane,
            defense_stamina: DefenseStaminaCosts::default(),
            finisher: FinisherRules::default(),
        }
    }
}

impl RuleConfiguration {
    /// Load from TOML text; unknown fields are rejected
    pub fn from_toml_str(text: &str) -> Result<RuleConfiguration> {
        Ok(toml::from_str(text)?)
    }
}
