//! Ward resolution
//!
//! A ward is evaluated before the normal defense branch: the warder tries to
//! interpose and negate the incoming move outright. A beaten ward marks the
//! defender and re-solicits a different concrete response; a successful ward
//! may convert into a free counter-attack.

use crate::actor::Combatant;
use crate::checks::{CheckDifficulty, CheckType, OpposedOutcome, OutcomeDirection};
use crate::core::Result;
use crate::effects::EffectDelta;
use crate::gear::WeaponReach;
use crate::moves::{AttackMove, DefenseKind, DefenseMove, OffenseKind};
use crate::resolution::result::CombatMoveResult;
use crate::resolution::{engine, ResolutionContext};
use rand::Rng;
use tracing::debug;

/// What the ward pre-branch decided
pub(crate) enum WardResolution {
    /// The move is fully negated; resolution ends here
    Negated {
        result: CombatMoveResult,
        counter: Option<Box<CombatMoveResult>>,
    },
    /// The ward was beaten; continue with the replacement defense
    Beaten { replacement: DefenseMove },
}

fn reach_steps(combatant: &Combatant) -> i32 {
    combatant
        .wielded
        .as_ref()
        .map(|weapon| weapon.reach.steps())
        .unwrap_or(WeaponReach::Grapple.steps())
}

/// Run the warder-vs-wardee opposed check and branch
pub(crate) fn resolve_ward(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    ward: &DefenseMove,
    ctx: &mut ResolutionContext,
    deltas: &mut Vec<EffectDelta>,
) -> Result<WardResolution> {
    // A longer attacking weapon makes the ward harder; a longer warding
    // weapon makes it easier.
    let reach_gap = reach_steps(attacker) - reach_steps(defender);
    let facing_stages = ctx.facing.defense_penalty_stages(defender.id, attacker.id);
    let ward_difficulty = CheckDifficulty::Normal.stage_up(
        reach_gap * ctx.config.ward_reach_stage_per_step
            + ward.desperate_stage_ups
            + facing_stages,
    );

    let bonus = defender.take_defensive_advantage();
    let cost = ward.stamina_cost(defender, ctx.config);
    defender.spend_stamina(cost);

    let warder_outcome = ctx.checks.check(
        defender,
        CheckType::WardCheck,
        ward_difficulty,
        Some(attacker),
        bonus,
    );
    let ignore_outcome = ctx.checks.check(
        attacker,
        CheckType::WardIgnoreCheck,
        CheckDifficulty::Normal,
        Some(defender),
        0.0,
    );

    let opposed = OpposedOutcome::compare(
        ignore_outcome,
        CheckDifficulty::Normal,
        Some(warder_outcome),
        ward_difficulty,
    );
    debug!(direction = ?opposed.direction, degree = ?opposed.degree, "ward resolution");

    if opposed.direction == OutcomeDirection::Proponent {
        deltas.push(EffectDelta::WardBeaten {
            actor: defender.id,
            seconds: ctx.config.ward_beaten_seconds,
        });
        // The defender must answer with something other than the ward.
        let replacement = match ctx.chooser.choose_defense(defender, attack) {
            Some(fallback)
                if !matches!(fallback.kind, DefenseKind::Ward | DefenseKind::TooExhausted) =>
            {
                fallback
            }
            _ => DefenseMove::helpless(defender.id),
        };
        return Ok(WardResolution::Beaten { replacement });
    }

    // Fully negated: the attacker recovers as from a failed move.
    let result = CombatMoveResult {
        move_was_successful: false,
        attacker_outcome: Some(ignore_outcome),
        defender_outcome: Some(warder_outcome),
        ward_succeeded: true,
        recovery_difficulty: attack.recovery(false),
        wounds_caused: Vec::new(),
        self_wounds_caused: Vec::new(),
    };

    let counter = if ctx.config.ward_counter_attacks
        && opposed.direction == OutcomeDirection::Opponent
    {
        free_counter_attack(attacker, defender, ctx, deltas)?
    } else {
        None
    };

    Ok(WardResolution::Negated { result, counter })
}

/// Resolve the warder's free counter as an independent sub-exchange
///
/// The counter weapon is chosen by weighted preference (wielded weapon over
/// natural attacks) and resolved against the original attacker's dodge.
fn free_counter_attack(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    ctx: &mut ResolutionContext,
    deltas: &mut Vec<EffectDelta>,
) -> Result<Option<Box<CombatMoveResult>>> {
    let weapon_attack = defender
        .wielded
        .as_ref()
        .and_then(|weapon| weapon.primary_attack())
        .cloned();

    let kind = match weapon_attack {
        // Wielded steel is preferred three to one over fists.
        Some(attack) if defender.natural_attacks.is_empty() || ctx.rng.gen_ratio(3, 4) => {
            OffenseKind::MeleeWeapon { attack }
        }
        _ => {
            let Some(natural) = pick_natural(defender, ctx) else {
                return Ok(None);
            };
            OffenseKind::NaturalAttack { natural }
        }
    };

    let counter_move = AttackMove::new(defender.id, attacker.id, kind);
    let dodge = DefenseMove::dodge(attacker.id);
    debug!("ward counter-attack");

    let sub = engine::resolve_attack(defender, attacker, &counter_move, Some(dodge), ctx)?;
    deltas.extend(sub.deltas);
    Ok(Some(Box::new(sub.result)))
}

fn pick_natural(
    defender: &Combatant,
    ctx: &mut ResolutionContext,
) -> Option<crate::gear::NaturalAttack> {
    if defender.natural_attacks.is_empty() {
        return None;
    }
    let index = ctx.rng.gen_range(0..defender.natural_attacks.len());
    defender.natural_attacks.get(index).cloned()
}
