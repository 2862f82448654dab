//! Skirmish: a turn-based combat exchange resolution engine
//!
//! An attacker commits a move, a defender commits a response, and
//! [`resolution::resolve_attack`] adjudicates the outcome: success or
//! failure, injury, positional consequences, stamina spent, and the recovery
//! difficulty the surrounding scheduler uses to delay the actor's next turn.
//!
//! The crate is an in-process library. Dice, wounds, effects, and message
//! text sit behind trait boundaries with small default implementations, so
//! it is usable stand-alone and fully deterministic under test.

pub mod actor;
pub mod checks;
pub mod config;
pub mod core;
pub mod damage;
pub mod effects;
pub mod formula;
pub mod gear;
pub mod message;
pub mod moves;
pub mod position;
pub mod resolution;
pub mod stamina;
pub mod wounds;

pub use crate::actor::Combatant;
pub use crate::checks::{
    CheckDifficulty, CheckGateway, CheckType, DiceGateway, OpposedOutcome, OpposedOutcomeDegree,
    Outcome, OutcomeDirection, ScriptedGateway,
};
pub use crate::config::RuleConfiguration;
pub use crate::moves::{AttackMove, DefenseKind, DefenseMove, FinisherKind, OffenseKind};
pub use crate::resolution::{
    resolve_attack, CombatMoveResult, DefenseChooser, NoFallback, ResolutionContext,
    ResolvedExchange,
};
