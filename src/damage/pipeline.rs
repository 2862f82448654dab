//! Damage computation pipeline
//!
//! Converts an attack profile plus the opposed-outcome degree into concrete
//! Damage packets: one to the target, and a complementary self-damage packet
//! back onto the attacker's weapon or limb. Pure functions; the engine owns
//! when each table applies.

use crate::checks::OpposedOutcomeDegree;
use crate::core::{ActorId, BodypartId, ItemId};
use crate::damage::{Damage, DamageType};
use crate::gear::profiles::AttackProfile;
use std::f64::consts::PI;

/// Angle multiplier when a dodge is beaten
///
/// A beaten dodge still narrows the connect compared to a clean hit.
pub fn dodge_loss_multiplier(degree: OpposedOutcomeDegree) -> f64 {
    match degree {
        OpposedOutcomeDegree::None => 0.5,
        OpposedOutcomeDegree::Marginal => 0.6,
        OpposedOutcomeDegree::Minor => 0.7,
        OpposedOutcomeDegree::Moderate => 0.8,
        OpposedOutcomeDegree::Major => 0.9,
        OpposedOutcomeDegree::Total => 1.0,
    }
}

/// Angle multiplier when a parry or block is beaten
///
/// More forgiving than the dodge table; even a beaten deflection bleeds off
/// most of a narrow win.
pub fn deflection_loss_multiplier(degree: OpposedOutcomeDegree) -> f64 {
    match degree {
        OpposedOutcomeDegree::None => 0.25,
        OpposedOutcomeDegree::Marginal => 0.4,
        OpposedOutcomeDegree::Minor => 0.55,
        OpposedOutcomeDegree::Moderate => 0.7,
        OpposedOutcomeDegree::Major => 0.85,
        OpposedOutcomeDegree::Total => 1.0,
    }
}

/// Shield wear fraction on a winning block, by win degree
pub fn shield_wear_multiplier(degree: OpposedOutcomeDegree) -> f64 {
    match degree {
        OpposedOutcomeDegree::None => 1.0,
        OpposedOutcomeDegree::Marginal => 0.8,
        OpposedOutcomeDegree::Minor => 0.6,
        OpposedOutcomeDegree::Moderate => 0.4,
        OpposedOutcomeDegree::Major => 0.2,
        OpposedOutcomeDegree::Total => 0.0,
    }
}

/// Weapon wear fraction on a winning parry, by win degree
///
/// Harsher than the shield table: even a total parry notches the blade.
pub fn parry_wear_multiplier(degree: OpposedOutcomeDegree) -> f64 {
    match degree {
        OpposedOutcomeDegree::None => 1.0,
        OpposedOutcomeDegree::Marginal => 0.85,
        OpposedOutcomeDegree::Minor => 0.7,
        OpposedOutcomeDegree::Moderate => 0.55,
        OpposedOutcomeDegree::Major => 0.4,
        OpposedOutcomeDegree::Total => 0.25,
    }
}

/// Fraction of a strike's force transferred to the target
///
/// Derived from material density comparison. For weapon strikes the
/// attacker's success margin sharpens the transfer.
pub fn relative_hardness(
    attacker_hardness: f64,
    target_hardness: f64,
    success_degrees: Option<i32>,
) -> f64 {
    let total = attacker_hardness + target_hardness;
    let base = if total <= 0.0 {
        0.5
    } else {
        attacker_hardness / total
    };
    let margin_factor = match success_degrees {
        Some(margin) => 1.0 + 0.05 * margin as f64,
        None => 1.0,
    };
    (base * margin_factor).clamp(0.0, 1.0)
}

/// Attacker-side inputs to a strike computation
#[derive(Debug, Clone)]
pub struct StrikeOrigin {
    pub actor: ActorId,
    /// Weapon dealing the strike, if any
    pub tool: Option<ItemId>,
    /// Density of the striking weapon or limb
    pub hardness: f64,
    /// Attacker success margin for weapon strikes, None for natural strikes
    pub success_degrees: Option<i32>,
    /// The attacker's own striking limb, for unarmed self damage
    pub striking_part: Option<BodypartId>,
}

/// Defender-side inputs to a strike computation
#[derive(Debug, Clone, Copy)]
pub struct StrikeTarget {
    pub part: Option<BodypartId>,
    /// Effective density at the struck location (armour or flesh)
    pub hardness: f64,
}

/// The two packets a strike can produce
#[derive(Debug, Clone)]
pub struct StrikePackets {
    pub to_target: Damage,
    /// Rebound onto the attacker's own weapon or limb
    pub to_attacker: Option<Damage>,
}

/// Scale a formula result by the angle of incidence
fn scaled(formula_value: f64, angle: f64) -> f64 {
    (formula_value.max(0.0) * 2.0 * angle / PI).max(0.0)
}

/// Compute target damage and complementary self damage for one strike
///
/// `angle_multiplier` comes from the per-defense degree tables above;
/// `quality` is the striking item's quality factor. When
/// `weapons_take_damage` is false the self-damage branch is disabled
/// entirely and only the target packet is produced.
pub fn compute_strike(
    profile: &AttackProfile,
    degree: OpposedOutcomeDegree,
    quality: f64,
    angle_multiplier: f64,
    origin: &StrikeOrigin,
    target: StrikeTarget,
    weapons_take_damage: bool,
) -> StrikePackets {
    let angle = profile.base_angle * angle_multiplier;
    let params: [(&str, f64); 2] = [("degree", degree.weight()), ("quality", quality)];

    let raw_damage = scaled(profile.damage_formula.evaluate_or_zero(&params), angle);
    let raw_pain = scaled(profile.pain_formula.evaluate_or_zero(&params), angle);
    let raw_stun = scaled(profile.stun_formula.evaluate_or_zero(&params), angle);

    let hardness = relative_hardness(origin.hardness, target.hardness, origin.success_degrees);

    let to_target = Damage {
        origin: origin.actor,
        tool: origin.tool,
        angle,
        bodypart: target.part,
        amount: raw_damage * hardness,
        damage_type: profile.damage_type,
        pain: raw_pain * hardness,
        stun: raw_stun * hardness,
        penetration: None,
        shock: raw_stun * hardness * 0.5,
    };

    let rebound = 1.0 - hardness;
    let to_attacker = if weapons_take_damage && rebound > 0.0 && raw_damage > 0.0 {
        Some(Damage {
            origin: origin.actor,
            tool: origin.tool,
            angle,
            bodypart: origin.striking_part,
            amount: raw_damage * rebound,
            damage_type: DamageType::Crushing,
            pain: raw_pain * rebound,
            stun: 0.0,
            penetration: None,
            shock: 0.0,
        })
    } else {
        None
    };

    StrikePackets {
        to_target,
        to_attacker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::profiles::AttackProfile;

    fn degrees() -> [OpposedOutcomeDegree; 6] {
        [
            OpposedOutcomeDegree::None,
            OpposedOutcomeDegree::Marginal,
            OpposedOutcomeDegree::Minor,
            OpposedOutcomeDegree::Moderate,
            OpposedOutcomeDegree::Major,
            OpposedOutcomeDegree::Total,
        ]
    }

    #[test]
    fn test_multiplier_tables_are_monotone() {
        for table in [
            dodge_loss_multiplier as fn(OpposedOutcomeDegree) -> f64,
            deflection_loss_multiplier,
        ] {
            let mut last = 0.0;
            for degree in degrees() {
                let value = table(degree);
                assert!(value >= last);
                last = value;
            }
        }
        for table in [
            shield_wear_multiplier as fn(OpposedOutcomeDegree) -> f64,
            parry_wear_multiplier,
        ] {
            let mut last = f64::MAX;
            for degree in degrees() {
                let value = table(degree);
                assert!(value <= last);
                last = value;
            }
        }
    }

    #[test]
    fn test_dodge_table_narrower_than_deflection() {
        // A grazing dodge loss still connects harder than a grazing parry
        // loss.
        assert!(
            dodge_loss_multiplier(OpposedOutcomeDegree::None)
                > deflection_loss_multiplier(OpposedOutcomeDegree::None)
        );
    }

    #[test]
    fn test_relative_hardness_bounds() {
        for attacker in [0.0, 0.1, 1.0, 10.0] {
            for target in [0.0, 0.1, 1.0, 10.0] {
                for margin in [None, Some(0), Some(3)] {
                    let hardness = relative_hardness(attacker, target, margin);
                    assert!((0.0..=1.0).contains(&hardness));
                }
            }
        }
    }

    #[test]
    fn test_equal_hardness_splits_evenly() {
        assert_eq!(relative_hardness(1.0, 1.0, None), 0.5);
    }

    fn strike_fixture() -> (AttackProfile, StrikeOrigin, StrikeTarget) {
        let profile = AttackProfile::sword_slash();
        let origin = StrikeOrigin {
            actor: ActorId::new(),
            tool: Some(ItemId::new()),
            hardness: 2.0,
            success_degrees: Some(2),
            striking_part: None,
        };
        let target = StrikeTarget {
            part: Some(BodypartId(0)),
            hardness: 1.0,
        };
        (profile, origin, target)
    }

    #[test]
    fn test_strike_amounts_non_negative() {
        let (profile, origin, target) = strike_fixture();
        for degree in degrees() {
            let packets =
                compute_strike(&profile, degree, 1.0, 1.0, &origin, target, true);
            assert!(packets.to_target.amount >= 0.0);
            assert!(packets.to_target.pain >= 0.0);
            assert!(packets.to_target.stun >= 0.0);
        }
    }

    #[test]
    fn test_split_conserves_magnitude() {
        let (profile, origin, target) = strike_fixture();
        let packets = compute_strike(
            &profile,
            OpposedOutcomeDegree::Major,
            1.0,
            1.0,
            &origin,
            target,
            true,
        );
        let angle = profile.base_angle;
        let raw = scaled(
            profile
                .damage_formula
                .evaluate_or_zero(&[("degree", 4.0), ("quality", 1.0)]),
            angle,
        );
        let self_amount = packets
            .to_attacker
            .as_ref()
            .map(|damage| damage.amount)
            .unwrap_or(0.0);
        assert!((packets.to_target.amount + self_amount - raw).abs() < 1e-9);
    }

    #[test]
    fn test_self_damage_is_crushing() {
        let (profile, origin, target) = strike_fixture();
        let packets = compute_strike(
            &profile,
            OpposedOutcomeDegree::Total,
            1.0,
            1.0,
            &origin,
            target,
            true,
        );
        let rebound = packets.to_attacker.unwrap();
        assert_eq!(rebound.damage_type, DamageType::Crushing);
    }

    #[test]
    fn test_weapons_take_damage_flag_disables_rebound() {
        let (profile, origin, target) = strike_fixture();
        let packets = compute_strike(
            &profile,
            OpposedOutcomeDegree::Total,
            1.0,
            1.0,
            &origin,
            target,
            false,
        );
        assert!(packets.to_attacker.is_none());
    }

    #[test]
    fn test_angle_multiplier_scales_damage() {
        let (profile, origin, target) = strike_fixture();
        let full = compute_strike(
            &profile,
            OpposedOutcomeDegree::Total,
            1.0,
            1.0,
            &origin,
            target,
            true,
        );
        let graze = compute_strike(
            &profile,
            OpposedOutcomeDegree::Total,
            1.0,
            0.5,
            &origin,
            target,
            true,
        );
        assert!(graze.to_target.amount < full.to_target.amount);
    }
}
