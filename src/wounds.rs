//! Wound records and the boundary to the wound subsystem
//!
//! The engine produces `Damage` values; what lasting harm they cause is the
//! wound subsystem's business. `ThresholdWounds` is a small default so the
//! crate works stand-alone.

use crate::actor::Combatant;
use crate::core::{ActorId, BodypartId};
use crate::damage::{Damage, DamageType};
use crate::gear::ItemCondition;
use serde::{Deserialize, Serialize};

/// Severity categories for lasting harm
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WoundSeverity {
    None,
    Scratch,
    Minor,
    Serious,
    Critical,
    Destroyed,
}

/// A lasting wound on an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wound {
    pub actor: ActorId,
    pub bodypart: Option<BodypartId>,
    pub severity: WoundSeverity,
    pub damage_type: DamageType,
    pub amount: f64,
    pub pain: f64,
    pub stun: f64,
}

/// Boundary to the wound/injury subsystem
pub trait WoundSubsystem {
    /// Record harm inflicted on a passive victim
    fn passive_suffer_damage(&mut self, victim: &mut Combatant, damage: &Damage) -> Vec<Wound>;

    /// Active variant for slow, sustained harm (strangulation)
    fn suffer_damage(&mut self, victim: &mut Combatant, damage: &Damage) -> Vec<Wound>;

    /// Record harm against an item (shield or weapon wear)
    fn passive_suffer_item_damage(&mut self, condition: &mut ItemCondition, damage: &Damage);

    /// Finalize a batch of freshly-inflicted wounds
    fn process_passive_wounds(&mut self, victim: &mut Combatant, wounds: Vec<Wound>)
        -> Vec<Wound>;
}

/// Default wound subsystem mapping raw amounts onto severity bands
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdWounds;

impl ThresholdWounds {
    fn severity_for(amount: f64) -> WoundSeverity {
        match amount {
            a if a <= 0.0 => WoundSeverity::None,
            a if a < 2.0 => WoundSeverity::Scratch,
            a if a < 6.0 => WoundSeverity::Minor,
            a if a < 12.0 => WoundSeverity::Serious,
            a if a < 20.0 => WoundSeverity::Critical,
            _ => WoundSeverity::Destroyed,
        }
    }

    fn wound_from(victim: &Combatant, damage: &Damage) -> Option<Wound> {
        if damage.is_negligible() {
            return None;
        }
        Some(Wound {
            actor: victim.id,
            bodypart: damage.bodypart,
            severity: Self::severity_for(damage.amount),
            damage_type: damage.damage_type,
            amount: damage.amount,
            pain: damage.pain,
            stun: damage.stun,
        })
    }
}

impl WoundSubsystem for ThresholdWounds {
    fn passive_suffer_damage(&mut self, victim: &mut Combatant, damage: &Damage) -> Vec<Wound> {
        match Self::wound_from(victim, damage) {
            Some(wound) => vec![wound],
            None => Vec::new(),
        }
    }

    fn suffer_damage(&mut self, victim: &mut Combatant, damage: &Damage) -> Vec<Wound> {
        // Sustained harm accumulates a band lower than a clean strike of the
        // same magnitude.
        let mut wounds = self.passive_suffer_damage(victim, damage);
        for wound in &mut wounds {
            wound.severity = match wound.severity {
                WoundSeverity::Destroyed => WoundSeverity::Critical,
                WoundSeverity::Critical => WoundSeverity::Serious,
                WoundSeverity::Serious => WoundSeverity::Minor,
                WoundSeverity::Minor => WoundSeverity::Scratch,
                other => other,
            };
        }
        wounds
    }

    fn passive_suffer_item_damage(&mut self, condition: &mut ItemCondition, damage: &Damage) {
        condition.wear(damage.amount);
    }

    fn process_passive_wounds(
        &mut self,
        victim: &mut Combatant,
        wounds: Vec<Wound>,
    ) -> Vec<Wound> {
        victim.wounds.extend(wounds.iter().cloned());
        wounds
    }
}
