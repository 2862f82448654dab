//! Effect deltas and the effect store
//!
//! Resolution never touches the effect store directly. Each exchange returns
//! a list of `EffectDelta` values which the driver applies in one step via
//! `EffectStore::apply`. Scheduler-facing deltas pass through the store
//! untouched; they are signals for the turn scheduler, not stored state.

use crate::core::{ActorId, ItemId};
use serde::{Deserialize, Serialize};

/// Scheduler lane an extra delay applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleClass {
    Combat,
    Stun,
    General,
}

/// A single effect-store or scheduler side effect produced by resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectDelta {
    WardBeaten {
        actor: ActorId,
        seconds: f64,
    },
    GrappleStarted {
        grappler: ActorId,
        target: ActorId,
        limbs: u32,
    },
    GrappleExtended {
        grappler: ActorId,
        target: ActorId,
        limbs: u32,
    },
    GrappleReleased {
        grappler: ActorId,
        target: ActorId,
    },
    ClinchEntered {
        actor: ActorId,
        target: ActorId,
        seconds: f64,
    },
    Staggered {
        actor: ActorId,
        seconds: f64,
    },
    /// Weapon ejected to the room with a no-pickup window
    Disarmed {
        actor: ActorId,
        item: ItemId,
        no_pickup_seconds: f64,
    },
    SecondWindImmunity {
        actor: ActorId,
        seconds: f64,
    },
    /// Extra delay for the scheduler; not stored as an effect
    ScheduleDelay {
        actor: ActorId,
        class: ScheduleClass,
        seconds: f64,
    },
}

/// Stored effect state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    WardBeaten,
    Grappling { target: ActorId, limbs: u32 },
    Clinch { target: ActorId },
    Staggered,
    NoPickup { item: ItemId },
    ExhaustionImmunity,
}

/// One live effect on an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub actor: ActorId,
    pub kind: EffectKind,
    /// Seconds until expiry; None is indefinite
    pub remaining: Option<f64>,
}

/// Per-encounter store of transient tagged effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectStore {
    active: Vec<ActiveEffect>,
}

impl EffectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch of deltas from one resolution
    pub fn apply(&mut self, deltas: &[EffectDelta]) {
        for delta in deltas {
            match delta {
                EffectDelta::WardBeaten { actor, seconds } => {
                    self.active.push(ActiveEffect {
                        actor: *actor,
                        kind: EffectKind::WardBeaten,
                        remaining: Some(*seconds),
                    });
                }
                EffectDelta::GrappleStarted {
                    grappler,
                    target,
                    limbs,
                } => {
                    self.active.push(ActiveEffect {
                        actor: *grappler,
                        kind: EffectKind::Grappling {
                            target: *target,
                            limbs: *limbs,
                        },
                        remaining: None,
                    });
                }
                EffectDelta::GrappleExtended {
                    grappler,
                    target,
                    limbs,
                } => {
                    for effect in &mut self.active {
                        if effect.actor == *grappler {
                            if let EffectKind::Grappling {
                                target: held,
                                limbs: count,
                            } = &mut effect.kind
                            {
                                if held == target {
                                    *count += limbs;
                                }
                            }
                        }
                    }
                }
                EffectDelta::GrappleReleased { grappler, target } => {
                    self.active.retain(|effect| {
                        !(effect.actor == *grappler
                            && matches!(
                                &effect.kind,
                                EffectKind::Grappling { target: held, .. } if held == target
                            ))
                    });
                }
                EffectDelta::ClinchEntered {
                    actor,
                    target,
                    seconds,
                } => {
                    self.active.push(ActiveEffect {
                        actor: *actor,
                        kind: EffectKind::Clinch { target: *target },
                        remaining: Some(*seconds),
                    });
                }
                EffectDelta::Staggered { actor, seconds } => {
                    self.active.push(ActiveEffect {
                        actor: *actor,
                        kind: EffectKind::Staggered,
                        remaining: Some(*seconds),
                    });
                }
                EffectDelta::Disarmed {
                    actor,
                    item,
                    no_pickup_seconds,
                } => {
                    self.active.push(ActiveEffect {
                        actor: *actor,
                        kind: EffectKind::NoPickup { item: *item },
                        remaining: Some(*no_pickup_seconds),
                    });
                }
                EffectDelta::SecondWindImmunity { actor, seconds } => {
                    self.active.push(ActiveEffect {
                        actor: *actor,
                        kind: EffectKind::ExhaustionImmunity,
                        remaining: Some(*seconds),
                    });
                }
                EffectDelta::ScheduleDelay { .. } => {}
            }
        }
    }

    /// Advance time and expire effects
    pub fn tick(&mut self, seconds: f64) {
        for effect in &mut self.active {
            if let Some(remaining) = &mut effect.remaining {
                *remaining -= seconds;
            }
        }
        self.active
            .retain(|effect| effect.remaining.map_or(true, |left| left > 0.0));
    }

    pub fn is_ward_beaten(&self, actor: ActorId) -> bool {
        self.active
            .iter()
            .any(|effect| effect.actor == actor && effect.kind == EffectKind::WardBeaten)
    }

    pub fn is_staggered(&self, actor: ActorId) -> bool {
        self.active
            .iter()
            .any(|effect| effect.actor == actor && effect.kind == EffectKind::Staggered)
    }

    pub fn has_exhaustion_immunity(&self, actor: ActorId) -> bool {
        self.active
            .iter()
            .any(|effect| effect.actor == actor && effect.kind == EffectKind::ExhaustionImmunity)
    }

    /// Limbs committed by `grappler` against `target`, zero when no grapple
    pub fn grapple_limbs(&self, grappler: ActorId, target: ActorId) -> u32 {
        self.active
            .iter()
            .find_map(|effect| match &effect.kind {
                EffectKind::Grappling {
                    target: held,
                    limbs,
                } if effect.actor == grappler && *held == target => Some(*limbs),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Is an item still under a no-pickup window?
    pub fn pickup_forbidden(&self, item: ItemId) -> bool {
        self.active.iter().any(|effect| {
            matches!(&effect.kind, EffectKind::NoPickup { item: held } if *held == item)
        })
    }
}
