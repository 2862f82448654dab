//! Grapple move resolution
//!
//! Grapple moves trade in holds rather than strikes: their outcomes are
//! effect deltas (started, extended, released) plus wrench and strangle
//! damage inside an established hold. Hold state lives in the effect store
//! and is only queried here; changes travel back as deltas.

use crate::actor::Combatant;
use crate::checks::{CheckType, OpposedOutcome, OpposedOutcomeDegree, Outcome, OutcomeDirection};
use crate::core::{BodypartId, CombatError, Result};
use crate::effects::EffectDelta;
use crate::moves::{AttackMove, DefenseKind, DefenseMove, OffenseKind};
use crate::resolution::defenses::{
    apply_body_strike, defense_check, recovery_for, AttackerCheck, StrikeSource,
};
use crate::resolution::result::CombatMoveResult;
use crate::resolution::ResolutionContext;
use crate::wounds::Wound;
use tracing::debug;

/// Limbs committed by a winning grapple initiate, scaled by degree
fn initiate_limbs(degree: OpposedOutcomeDegree) -> u32 {
    (1 + degree.weight() as u32 / 2).min(3)
}

/// Run the defender's response to a grapple move
///
/// Grapple moves accept counter-grapple, dodge (initiate only), or no
/// defense. Anything else is an unanticipated combination and fails loudly.
fn grapple_defense(
    attacker: &Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    defense: &DefenseMove,
    allow_dodge: bool,
    ctx: &mut ResolutionContext,
) -> Result<Option<(Outcome, crate::checks::CheckDifficulty)>> {
    match defense.kind {
        DefenseKind::Helpless | DefenseKind::TooExhausted => Ok(None),
        DefenseKind::CounterGrapple => Ok(Some(defense_check(
            attacker,
            defender,
            attack,
            defense,
            CheckType::CounterGrappleCheck,
            0.0,
            ctx,
        ))),
        DefenseKind::Dodge if allow_dodge => Ok(Some(defense_check(
            attacker,
            defender,
            attack,
            defense,
            CheckType::DodgeCheck,
            0.0,
            ctx,
        ))),
        other => Err(CombatError::UnsupportedDefense {
            attack: attack.kind.name().to_string(),
            defense: other.name().to_string(),
        }),
    }
}

fn grapple_result(
    attack: &AttackMove,
    att: AttackerCheck,
    defender_outcome: Option<Outcome>,
    won: bool,
    wounds: Vec<Wound>,
) -> CombatMoveResult {
    CombatMoveResult {
        move_was_successful: won,
        attacker_outcome: Some(att.outcome),
        defender_outcome,
        ward_succeeded: false,
        recovery_difficulty: recovery_for(attack, att.outcome, defender_outcome),
        wounds_caused: wounds,
        self_wounds_caused: Vec::new(),
    }
}

/// Resolve any of the grapple family of moves
pub(crate) fn resolve_grapple(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    defense: &DefenseMove,
    att: AttackerCheck,
    ctx: &mut ResolutionContext,
    deltas: &mut Vec<EffectDelta>,
) -> Result<CombatMoveResult> {
    match &attack.kind {
        OffenseKind::GrappleInitiate => {
            let response = grapple_defense(attacker, defender, attack, defense, true, ctx)?;
            let opposed = opposed_from(att, response);

            match opposed.direction {
                OutcomeDirection::Proponent => {
                    let limbs = initiate_limbs(opposed.degree);
                    debug!(limbs, "grapple established");
                    deltas.push(EffectDelta::GrappleStarted {
                        grappler: attacker.id,
                        target: defender.id,
                        limbs,
                    });
                    Ok(grapple_result(
                        attack,
                        att,
                        response.map(|(outcome, _)| outcome),
                        true,
                        Vec::new(),
                    ))
                }
                _ => {
                    // A total counter-grapple turns the hold around.
                    if defense.kind == DefenseKind::CounterGrapple
                        && opposed.direction == OutcomeDirection::Opponent
                        && opposed.degree == OpposedOutcomeDegree::Total
                    {
                        debug!("grapple countered and reversed");
                        deltas.push(EffectDelta::GrappleStarted {
                            grappler: defender.id,
                            target: attacker.id,
                            limbs: 1,
                        });
                    }
                    Ok(grapple_result(
                        attack,
                        att,
                        response.map(|(outcome, _)| outcome),
                        false,
                        Vec::new(),
                    ))
                }
            }
        }

        OffenseKind::GrappleExtend => {
            if ctx.effects.grapple_limbs(attacker.id, defender.id) == 0 {
                return Ok(CombatMoveResult::irrelevant());
            }
            let response = grapple_defense(attacker, defender, attack, defense, false, ctx)?;
            let opposed = opposed_from(att, response);
            if opposed.direction == OutcomeDirection::Proponent {
                deltas.push(EffectDelta::GrappleExtended {
                    grappler: attacker.id,
                    target: defender.id,
                    limbs: 1,
                });
            }
            Ok(grapple_result(
                attack,
                att,
                response.map(|(outcome, _)| outcome),
                opposed.direction == OutcomeDirection::Proponent,
                Vec::new(),
            ))
        }

        OffenseKind::GrappleBreakout => {
            // The mover is the one held; success releases the hold on them.
            if ctx.effects.grapple_limbs(defender.id, attacker.id) == 0 {
                return Ok(CombatMoveResult::irrelevant());
            }
            let response = grapple_defense(attacker, defender, attack, defense, false, ctx)?;
            let opposed = opposed_from(att, response);
            if opposed.direction == OutcomeDirection::Proponent {
                debug!("breakout succeeded");
                deltas.push(EffectDelta::GrappleReleased {
                    grappler: defender.id,
                    target: attacker.id,
                });
            }
            Ok(grapple_result(
                attack,
                att,
                response.map(|(outcome, _)| outcome),
                opposed.direction == OutcomeDirection::Proponent,
                Vec::new(),
            ))
        }

        OffenseKind::GrappleWrench { attack: profile } => {
            if ctx.effects.grapple_limbs(attacker.id, defender.id) == 0 {
                return Ok(CombatMoveResult::irrelevant());
            }
            let response = grapple_defense(attacker, defender, attack, defense, false, ctx)?;
            let opposed = opposed_from(att, response);

            let wounds = if opposed.direction == OutcomeDirection::Proponent {
                let target_part = held_limb(defender, ctx);
                let source = bare_source();
                let (wounds, _) = apply_body_strike(
                    attacker,
                    defender,
                    &source,
                    profile,
                    opposed.degree,
                    1.0,
                    target_part,
                    1.0,
                    ctx,
                );
                wounds
            } else {
                Vec::new()
            };

            Ok(grapple_result(
                attack,
                att,
                response.map(|(outcome, _)| outcome),
                opposed.direction == OutcomeDirection::Proponent,
                wounds,
            ))
        }

        OffenseKind::GrappleStrangle { attack: profile } => {
            if ctx.effects.grapple_limbs(attacker.id, defender.id) == 0 {
                return Ok(CombatMoveResult::irrelevant());
            }
            let response = grapple_defense(attacker, defender, attack, defense, false, ctx)?;
            let opposed = opposed_from(att, response);

            let wounds = if opposed.direction == OutcomeDirection::Proponent {
                strangle_damage(attacker, defender, profile, opposed.degree, ctx)
            } else {
                Vec::new()
            };

            Ok(grapple_result(
                attack,
                att,
                response.map(|(outcome, _)| outcome),
                opposed.direction == OutcomeDirection::Proponent,
                wounds,
            ))
        }

        other => Err(CombatError::UnsupportedDefense {
            attack: other.name().to_string(),
            defense: defense.kind.name().to_string(),
        }),
    }
}

fn opposed_from(
    att: AttackerCheck,
    response: Option<(Outcome, crate::checks::CheckDifficulty)>,
) -> OpposedOutcome {
    match response {
        Some((outcome, difficulty)) => {
            OpposedOutcome::compare(att.outcome, att.difficulty, Some(outcome), difficulty)
        }
        None => OpposedOutcome::compare(att.outcome, att.difficulty, None, att.difficulty),
    }
}

/// Strike source for bodily grapple harm (no tool, no rebound)
fn bare_source() -> StrikeSource {
    StrikeSource {
        tool: None,
        hardness: 0.8,
        quality: 1.0,
        margin: None,
        striking_part: None,
        natural: true,
        rebounds: false,
    }
}

/// A limb currently worth wrenching
fn held_limb(defender: &Combatant, ctx: &mut ResolutionContext) -> Option<BodypartId> {
    defender
        .body
        .select_weighted(ctx.rng, 1.0, |part| !part.vital)
}

/// Slow strangulation through the active damage path
fn strangle_damage(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    profile: &crate::gear::AttackProfile,
    degree: OpposedOutcomeDegree,
    ctx: &mut ResolutionContext,
) -> Vec<Wound> {
    use crate::damage::pipeline::{compute_strike, StrikeOrigin, StrikeTarget};

    let neck = defender.body.find("neck");
    let hardness = neck
        .and_then(|id| defender.body.get(id))
        .map(|part| defender.hardness_at(part))
        .unwrap_or(0.6);

    let origin = StrikeOrigin {
        actor: attacker.id,
        tool: None,
        hardness: 0.8,
        success_degrees: None,
        striking_part: None,
    };
    let packets = compute_strike(
        profile,
        degree,
        1.0,
        1.0,
        &origin,
        StrikeTarget {
            part: neck,
            hardness,
        },
        false,
    );

    let wounds = ctx.wounds.suffer_damage(defender, &packets.to_target);
    ctx.wounds.process_passive_wounds(defender, wounds)
}
