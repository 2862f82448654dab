//! The generic resolution algorithm
//!
//! One entry point resolves every (attacker move, defender move) pairing:
//! validate preconditions, convert degenerate defenses, run the ward
//! pre-branch, roll the attack check, pick the struck location, dispatch
//! exhaustively on the defense kind, then settle recovery and exertion.

use crate::actor::Combatant;
use crate::checks::{OpposedOutcomeDegree, Outcome};
use crate::core::{CombatError, Result};
use crate::effects::EffectDelta;
use crate::moves::{AttackMove, DefenseKind, DefenseMove, OffenseKind};
use crate::resolution::defenses::{
    self, recovery_for, AttackerCheck, StrikeSource,
};
use crate::resolution::result::{CombatMoveResult, ResolvedExchange};
use crate::resolution::ward::{self, WardResolution};
use crate::resolution::{finishers, grapple, targets, ResolutionContext};
use tracing::debug;

/// Resolve one committed attack against one committed defense
///
/// A `None` defense synthesizes a helpless response. The moves are consumed
/// by this call; construct fresh ones for each attempt.
///
/// # Errors
/// Precondition violations (no wound-capable body, missing required gear,
/// unanticipated attack/defense pairing) are programming errors surfaced as
/// `CombatError`, never silently defaulted.
pub fn resolve_attack(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    defense: Option<DefenseMove>,
    ctx: &mut ResolutionContext,
) -> Result<ResolvedExchange> {
    if !defender.body.is_woundable() {
        return Err(CombatError::NoWoundCapableBody(defender.id));
    }
    if attack.target != defender.id {
        debug!("target no longer valid; zero-effect result");
        return Ok(ResolvedExchange::new(CombatMoveResult::irrelevant()));
    }
    if attack.kind.needs_melee_weapon() && attacker.wielded.is_none() {
        return Err(CombatError::NoWieldedWeapon(attacker.id));
    }

    // Ranged moves consume ammunition before anything else; an empty weapon
    // is a gameplay no-op, not an error.
    if let OffenseKind::Ranged { .. } = &attack.kind {
        match attacker.ranged.as_mut() {
            None => return Err(CombatError::NoRangedWeapon(attacker.id)),
            Some(weapon) if !weapon.loaded => {
                debug!("ranged weapon empty; zero-effect result");
                return Ok(ResolvedExchange::new(CombatMoveResult::irrelevant()));
            }
            Some(weapon) => weapon.loaded = false,
        }
    }

    let mut deltas: Vec<EffectDelta> = Vec::new();
    let mut defense = defense.unwrap_or_else(|| DefenseMove::helpless(defender.id));
    defense.resolve_defense_used();

    // Too exhausted: consult the second wind before falling back.
    if defense.kind == DefenseKind::TooExhausted {
        defense = resolve_exhaustion(defender, attack, ctx, &mut deltas);
    }

    // Ward pre-branch: may end the resolution outright.
    if defense.kind == DefenseKind::Ward {
        match ward::resolve_ward(attacker, defender, attack, &defense, ctx, &mut deltas)? {
            WardResolution::Negated { result, counter } => {
                attacker.raise_exertion(attack.exertion());
                defender.raise_exertion(defense.exertion());
                return Ok(ResolvedExchange {
                    result,
                    deltas,
                    counter_attack: counter,
                });
            }
            WardResolution::Beaten { replacement } => {
                defense = replacement;
            }
        }
    }

    // Attacking spends the attacker's own positional bookkeeping first.
    ctx.facing.worsen(attacker.id, defender.id, ctx.rng);

    let cost = attack.stamina_cost(attacker, ctx.config);
    attacker.spend_stamina(cost);

    let bonus = attacker.take_offensive_advantage();
    let attacker_outcome = ctx.checks.check(
        attacker,
        attack.check_type(),
        attack.difficulty(),
        Some(defender),
        bonus,
    );
    let att = AttackerCheck {
        outcome: attacker_outcome,
        difficulty: attack.difficulty(),
    };
    debug!(attack = attack.kind.name(), ?attacker_outcome, "attack check");

    let source = build_strike_source(attacker, &attack.kind, attacker_outcome)?;
    let defenseless = matches!(
        defense.kind,
        DefenseKind::Helpless | DefenseKind::TooExhausted
    );
    let target_part = targets::select_target_part(
        attacker,
        defender,
        &attack.kind,
        attacker_outcome,
        defenseless,
        attack.friendly,
        ctx.facing,
        ctx.config.vital_bias,
        ctx.rng,
    );

    let result = if attack.kind.is_grapple() {
        grapple::resolve_grapple(attacker, defender, attack, &defense, att, ctx, &mut deltas)?
    } else if let OffenseKind::CoupDeGrace { attack: profile } = &attack.kind {
        if !defenseless {
            return Err(CombatError::UnsupportedDefense {
                attack: attack.kind.name().to_string(),
                defense: defense.kind.name().to_string(),
            });
        }
        resolve_coup_de_grace(attacker, defender, attack, profile, att, &source, ctx)?
    } else {
        match defense.kind {
            DefenseKind::Helpless | DefenseKind::TooExhausted => defenses::resolve_helpless(
                attacker,
                defender,
                attack,
                att,
                &source,
                target_part,
                ctx,
            )?,
            DefenseKind::Dodge => defenses::resolve_dodge(
                attacker,
                defender,
                attack,
                &defense,
                att,
                &source,
                target_part,
                ctx,
                &mut deltas,
            )?,
            DefenseKind::Parry => {
                if !can_be_parried(&attack.kind) {
                    return Err(CombatError::UnsupportedDefense {
                        attack: attack.kind.name().to_string(),
                        defense: defense.kind.name().to_string(),
                    });
                }
                defenses::resolve_parry(
                    attacker,
                    defender,
                    attack,
                    &defense,
                    att,
                    &source,
                    target_part,
                    ctx,
                    &mut deltas,
                )?
            }
            DefenseKind::Block => defenses::resolve_block(
                attacker,
                defender,
                attack,
                &defense,
                att,
                &source,
                target_part,
                ctx,
                &mut deltas,
            )?,
            DefenseKind::CounterGrapple | DefenseKind::Ward => {
                return Err(CombatError::UnsupportedDefense {
                    attack: attack.kind.name().to_string(),
                    defense: defense.kind.name().to_string(),
                });
            }
        }
    };

    // A landed move corrects the attacker's pre-spent position.
    if result.move_was_successful {
        ctx.facing.reset(attacker.id, defender.id);
    }

    if let Some(finisher) = attack.finisher {
        if result.move_was_successful {
            finishers::resolve_finisher(attacker, defender, finisher, ctx, &mut deltas);
        }
    }

    // Both participants end at least as exerted as the move demanded.
    attacker.raise_exertion(attack.exertion());
    defender.raise_exertion(attack.exertion());
    defender.raise_exertion(defense.exertion());

    // Clinch strikes keep the pair entangled.
    if attack.kind.is_clinch() && result.move_was_successful {
        deltas.push(EffectDelta::ClinchEntered {
            actor: attacker.id,
            target: defender.id,
            seconds: 10.0,
        });
    }

    debug!(
        successful = result.move_was_successful,
        wounds = result.wounds_caused.len(),
        recovery = ?result.recovery_difficulty,
        "exchange resolved"
    );
    Ok(ResolvedExchange {
        result,
        deltas,
        counter_attack: None,
    })
}

/// Second-wind consultation for a too-exhausted defender
fn resolve_exhaustion(
    defender: &mut Combatant,
    attack: &AttackMove,
    ctx: &mut ResolutionContext,
    deltas: &mut Vec<EffectDelta>,
) -> DefenseMove {
    if defender.second_wind.try_consume() {
        debug!("second wind fires");
        defender.restore_stamina_to_max();
        deltas.push(EffectDelta::SecondWindImmunity {
            actor: defender.id,
            seconds: ctx.config.second_wind_immunity_seconds,
        });
        match ctx.chooser.choose_defense(defender, attack) {
            Some(fallback)
                if !matches!(
                    fallback.kind,
                    DefenseKind::Ward | DefenseKind::TooExhausted
                ) =>
            {
                return fallback;
            }
            _ => {}
        }
    }
    DefenseMove::helpless(defender.id)
}

/// An execution strike against a helpless target
fn resolve_coup_de_grace(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    profile: &crate::gear::AttackProfile,
    att: AttackerCheck,
    source: &StrikeSource,
    ctx: &mut ResolutionContext,
) -> Result<CombatMoveResult> {
    let target_part = targets::select_vital_part(defender, ctx.rng);
    let (wounds, self_wounds) = defenses::apply_body_strike(
        attacker,
        defender,
        source,
        profile,
        OpposedOutcomeDegree::Total,
        1.0,
        target_part,
        ctx.config.coup_de_grace_multiplier,
        ctx,
    );
    Ok(CombatMoveResult {
        move_was_successful: true,
        attacker_outcome: Some(att.outcome),
        defender_outcome: None,
        ward_succeeded: false,
        recovery_difficulty: recovery_for(attack, Outcome::MajorPass, None),
        wounds_caused: wounds,
        self_wounds_caused: self_wounds,
    })
}

/// Ranged and magic strikes cannot be met with a blade
fn can_be_parried(kind: &OffenseKind) -> bool {
    !matches!(
        kind,
        OffenseKind::Ranged { .. } | OffenseKind::MagicPower { .. }
    )
}

/// Precompute the physical source of the strike for the damage pipeline
fn build_strike_source(
    attacker: &Combatant,
    kind: &OffenseKind,
    attacker_outcome: Outcome,
) -> Result<StrikeSource> {
    let margin = attacker_outcome.success_degrees();
    match kind {
        OffenseKind::MeleeWeapon { .. }
        | OffenseKind::ClinchWeapon { .. }
        | OffenseKind::CoupDeGrace { .. }
        | OffenseKind::DownedAttack { .. } => {
            let weapon = attacker
                .wielded
                .as_ref()
                .ok_or(CombatError::NoWieldedWeapon(attacker.id))?;
            Ok(StrikeSource {
                tool: Some(weapon.id),
                hardness: weapon.material_density,
                quality: weapon.quality.factor(),
                margin: Some(margin),
                striking_part: None,
                natural: false,
                rebounds: true,
            })
        }
        OffenseKind::NaturalAttack { natural } | OffenseKind::ClinchNatural { natural } => {
            let striking_part = attacker.body.find(&natural.striking_part);
            let hardness = striking_part
                .and_then(|id| attacker.body.get(id))
                .map(|part| part.natural_hardness)
                .unwrap_or(0.7);
            Ok(StrikeSource {
                tool: None,
                hardness,
                quality: 1.0,
                margin: None,
                striking_part,
                natural: true,
                rebounds: true,
            })
        }
        OffenseKind::Ranged { .. } => {
            let weapon = attacker
                .ranged
                .as_ref()
                .ok_or(CombatError::NoRangedWeapon(attacker.id))?;
            Ok(StrikeSource {
                tool: Some(weapon.id),
                hardness: weapon.material_density,
                quality: weapon.quality.factor(),
                margin: Some(margin),
                striking_part: None,
                natural: false,
                rebounds: false,
            })
        }
        OffenseKind::MagicPower { .. } => Ok(StrikeSource {
            tool: None,
            hardness: 5.0,
            quality: 1.0,
            margin: None,
            striking_part: None,
            natural: false,
            rebounds: false,
        }),
        OffenseKind::GrappleInitiate
        | OffenseKind::GrappleExtend
        | OffenseKind::GrappleWrench { .. }
        | OffenseKind::GrappleStrangle { .. }
        | OffenseKind::GrappleBreakout => Ok(StrikeSource {
            tool: None,
            hardness: 0.8,
            quality: 1.0,
            margin: None,
            striking_part: None,
            natural: true,
            rebounds: false,
        }),
    }
}
