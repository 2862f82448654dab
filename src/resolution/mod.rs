//! The resolution engine
//!
//! One entry point, `engine::resolve_attack`, ties the whole crate together:
//! it runs the attack check, picks the struck location, dispatches on the
//! defense kind, computes opposed outcomes and damage, and returns the
//! uniform result plus isolated effect deltas.

pub mod defenses;
pub mod engine;
pub mod finishers;
pub mod grapple;
pub mod result;
pub mod targets;
pub mod ward;

pub use engine::resolve_attack;
pub use result::{CombatMoveResult, ResolvedExchange};

use crate::actor::Combatant;
use crate::checks::CheckGateway;
use crate::config::RuleConfiguration;
use crate::effects::EffectStore;
use crate::moves::{AttackMove, DefenseMove};
use crate::position::FacingTracker;
use crate::wounds::WoundSubsystem;
use rand::rngs::StdRng;

/// Driver callback for re-soliciting a defense mid-resolution
///
/// Asked when a ward is beaten (the defender must supply a different
/// concrete response) and after a successful second wind.
pub trait DefenseChooser {
    fn choose_defense(&mut self, defender: &Combatant, attack: &AttackMove)
        -> Option<DefenseMove>;
}

/// Chooser that never supplies a fallback defense
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl DefenseChooser for NoFallback {
    fn choose_defense(
        &mut self,
        _defender: &Combatant,
        _attack: &AttackMove,
    ) -> Option<DefenseMove> {
        None
    }
}

/// Everything one resolution needs besides the two combatants
pub struct ResolutionContext<'a> {
    pub config: &'a RuleConfiguration,
    pub checks: &'a mut dyn CheckGateway,
    pub facing: &'a mut FacingTracker,
    pub wounds: &'a mut dyn WoundSubsystem,
    /// Read-only view of live effects (grapple state queries)
    pub effects: &'a EffectStore,
    pub chooser: &'a mut dyn DefenseChooser,
    pub rng: &'a mut StdRng,
}
