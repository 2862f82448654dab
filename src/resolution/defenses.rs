//! Per-defense-type resolution algorithms
//!
//! All branches share one structure: run the defender's check at a
//! stage-adjusted difficulty with their gear bonus plus consumed defensive
//! advantage minus the facing penalty, compute the opposed outcome, then
//! branch on direction.

use crate::actor::Combatant;
use crate::checks::{
    CheckDifficulty, CheckType, OpposedOutcome, OpposedOutcomeDegree, Outcome, OutcomeDirection,
};
use crate::core::{BodypartId, CombatError, ItemId, Result};
use crate::damage::pipeline::{
    compute_strike, deflection_loss_multiplier, dodge_loss_multiplier, parry_wear_multiplier,
    shield_wear_multiplier, StrikeOrigin, StrikeTarget,
};
use crate::damage::Damage;
use crate::effects::EffectDelta;
use crate::gear::AttackProfile;
use crate::moves::{AttackMove, DefenseMove};
use crate::resolution::result::CombatMoveResult;
use crate::resolution::ResolutionContext;
use crate::wounds::Wound;
use rand::Rng;
use tracing::{debug, trace};

/// The attacker's already-rolled check, carried into every branch
#[derive(Debug, Clone, Copy)]
pub(crate) struct AttackerCheck {
    pub outcome: Outcome,
    pub difficulty: CheckDifficulty,
}

/// Physical source of the strike, precomputed by the engine
#[derive(Debug, Clone)]
pub(crate) struct StrikeSource {
    pub tool: Option<ItemId>,
    /// Density of the striking weapon or limb
    pub hardness: f64,
    /// Quality factor fed to damage formulas
    pub quality: f64,
    /// Success margin for weapon strikes, None for natural ones
    pub margin: Option<i32>,
    /// Attacker's own striking limb, for unarmed self damage
    pub striking_part: Option<BodypartId>,
    /// Unarmed strike (self damage wounds flesh instead of wearing steel)
    pub natural: bool,
    /// Whether the self-damage branch applies to this kind at all
    pub rebounds: bool,
}

/// Run the defender's check for a tested defense
///
/// Consumes the defender's defensive advantage and stamina. Returns the
/// outcome and the staged difficulty it was tested at.
pub(crate) fn defense_check(
    attacker: &Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    defense: &DefenseMove,
    check: CheckType,
    gear_bonus: f64,
    ctx: &mut ResolutionContext,
) -> (Outcome, CheckDifficulty) {
    let base = attack
        .kind
        .profile()
        .map(|profile| profile.defense_difficulty)
        .unwrap_or(CheckDifficulty::Normal);
    let facing_stages = ctx.facing.defense_penalty_stages(defender.id, attacker.id);
    let difficulty = base.stage_up(defense.desperate_stage_ups + facing_stages);

    let bonus = defender.take_defensive_advantage() + gear_bonus;
    let cost = defense.stamina_cost(defender, ctx.config);
    defender.spend_stamina(cost);

    let outcome = ctx
        .checks
        .check(defender, check, difficulty, Some(attacker), bonus);
    trace!(
        defense = defense.kind.name(),
        ?difficulty,
        bonus,
        ?outcome,
        "defense check"
    );
    (outcome, difficulty)
}

/// Recovery difficulty for the attacker, staged by a decisive defense
pub(crate) fn recovery_for(
    attack: &AttackMove,
    attacker_outcome: Outcome,
    defender_outcome: Option<Outcome>,
) -> CheckDifficulty {
    let base = attack.recovery(attacker_outcome.is_pass());
    match defender_outcome.map(|outcome| outcome.success_degrees()) {
        Some(margin) if margin >= 3 => base.stage_up(2),
        Some(margin) if margin >= 2 => base.stage_up(1),
        _ => base,
    }
}

/// Apply a connecting strike to the defender's body
///
/// Returns (wounds to the defender, self wounds to the attacker). Target
/// wounds are always applied before self/collateral harm. Weapon self
/// damage wears the attacker's weapon instead of wounding flesh.
pub(crate) fn apply_body_strike(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    source: &StrikeSource,
    profile: &AttackProfile,
    degree: OpposedOutcomeDegree,
    angle_multiplier: f64,
    target_part: Option<BodypartId>,
    amount_multiplier: f64,
    ctx: &mut ResolutionContext,
) -> (Vec<Wound>, Vec<Wound>) {
    let target_hardness = target_part
        .and_then(|id| defender.body.get(id))
        .map(|part| defender.hardness_at(part))
        .unwrap_or(0.5);

    let origin = StrikeOrigin {
        actor: attacker.id,
        tool: source.tool,
        hardness: source.hardness,
        success_degrees: source.margin,
        striking_part: source.striking_part,
    };
    let target = StrikeTarget {
        part: target_part,
        hardness: target_hardness,
    };
    let mut packets = compute_strike(
        profile,
        degree,
        source.quality,
        angle_multiplier,
        &origin,
        target,
        ctx.config.weapons_take_damage && source.rebounds,
    );
    packets.to_target.amount *= amount_multiplier;
    packets.to_target.pain *= amount_multiplier;
    packets.to_target.stun *= amount_multiplier;

    packets.to_target.penetration = Some(ctx.checks.check(
        attacker,
        CheckType::MeleeWeaponPenetrateCheck,
        packets.to_target.damage_type.penetrate_difficulty(),
        None,
        0.0,
    ));
    trace!(
        amount = packets.to_target.amount,
        pain = packets.to_target.pain,
        ?target_part,
        "strike damage"
    );

    let wounds = ctx.wounds.passive_suffer_damage(defender, &packets.to_target);
    let wounds = ctx.wounds.process_passive_wounds(defender, wounds);

    let self_wounds = match &packets.to_attacker {
        Some(rebound) => apply_rebound(attacker, source, rebound, ctx),
        None => Vec::new(),
    };

    (wounds, self_wounds)
}

/// Route rebound harm onto the attacker's weapon or limb
pub(crate) fn apply_rebound(
    attacker: &mut Combatant,
    source: &StrikeSource,
    rebound: &Damage,
    ctx: &mut ResolutionContext,
) -> Vec<Wound> {
    if source.natural {
        let wounds = ctx.wounds.passive_suffer_damage(attacker, rebound);
        return ctx.wounds.process_passive_wounds(attacker, wounds);
    }
    if let Some(weapon) = attacker.wielded.as_mut() {
        ctx.wounds
            .passive_suffer_item_damage(&mut weapon.condition, rebound);
    }
    Vec::new()
}

/// Helpless: no defender check, full damage on any attacker pass
pub(crate) fn resolve_helpless(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    att: AttackerCheck,
    source: &StrikeSource,
    target_part: Option<BodypartId>,
    ctx: &mut ResolutionContext,
) -> Result<CombatMoveResult> {
    let profile = required_profile(attack)?;
    let opposed = OpposedOutcome::compare(att.outcome, att.difficulty, None, att.difficulty);

    let (wounds, self_wounds) = if opposed.proponent_won() {
        apply_body_strike(
            attacker,
            defender,
            source,
            profile,
            opposed.degree,
            1.0,
            target_part,
            1.0,
            ctx,
        )
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(CombatMoveResult {
        move_was_successful: opposed.proponent_won(),
        attacker_outcome: Some(att.outcome),
        defender_outcome: None,
        ward_succeeded: false,
        recovery_difficulty: recovery_for(attack, att.outcome, None),
        wounds_caused: wounds,
        self_wounds_caused: self_wounds,
    })
}

/// Dodge: clean escape on a defender win, narrowed connect on a loss
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_dodge(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    defense: &DefenseMove,
    att: AttackerCheck,
    source: &StrikeSource,
    target_part: Option<BodypartId>,
    ctx: &mut ResolutionContext,
    _deltas: &mut Vec<EffectDelta>,
) -> Result<CombatMoveResult> {
    let profile = required_profile(attack)?;
    let (defender_outcome, difficulty) = defense_check(
        attacker,
        defender,
        attack,
        defense,
        CheckType::DodgeCheck,
        0.0,
        ctx,
    );
    let opposed =
        OpposedOutcome::compare(att.outcome, att.difficulty, Some(defender_outcome), difficulty);
    debug!(direction = ?opposed.direction, degree = ?opposed.degree, "dodge resolution");

    let mut wounds = Vec::new();
    let mut self_wounds = Vec::new();
    match opposed.direction {
        OutcomeDirection::Proponent => {
            let (hit, rebound) = apply_body_strike(
                attacker,
                defender,
                source,
                profile,
                opposed.degree,
                dodge_loss_multiplier(opposed.degree),
                target_part,
                1.0,
                ctx,
            );
            wounds = hit;
            self_wounds = rebound;

            // A disastrous dodge can put the defender on the ground.
            if defender_outcome == Outcome::MajorFail
                && ctx.rng.gen_bool(ctx.config.dodge_fall_chance.clamp(0.0, 1.0))
            {
                defender.posture = crate::actor::Posture::Prone;
            }
        }
        OutcomeDirection::Opponent | OutcomeDirection::Stalemate => {
            if opposed.direction == OutcomeDirection::Opponent
                && opposed.degree == OpposedOutcomeDegree::Total
            {
                // A perfect dodge slips around the attacker entirely.
                ctx.facing.outflank(attacker.id, defender.id, ctx.rng);
                defender
                    .grant_offensive_advantage(ctx.config.perfect_dodge_offensive_advantage);
            }
        }
    }

    Ok(CombatMoveResult {
        move_was_successful: opposed.proponent_won(),
        attacker_outcome: Some(att.outcome),
        defender_outcome: Some(defender_outcome),
        ward_succeeded: false,
        recovery_difficulty: recovery_for(attack, att.outcome, Some(defender_outcome)),
        wounds_caused: wounds,
        self_wounds_caused: self_wounds,
    })
}

/// Parry: weapon interposition, with disarm on a total success
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_parry(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    defense: &DefenseMove,
    att: AttackerCheck,
    source: &StrikeSource,
    target_part: Option<BodypartId>,
    ctx: &mut ResolutionContext,
    deltas: &mut Vec<EffectDelta>,
) -> Result<CombatMoveResult> {
    let profile = required_profile(attack)?;
    let (parry_bonus, parry_hardness) = match &defender.wielded {
        Some(weapon) => (weapon.parry_bonus, weapon.material_density),
        None => return Err(CombatError::ParryWithoutWeapon(defender.id)),
    };

    let (defender_outcome, difficulty) = defense_check(
        attacker,
        defender,
        attack,
        defense,
        CheckType::ParryCheck,
        parry_bonus,
        ctx,
    );
    let opposed =
        OpposedOutcome::compare(att.outcome, att.difficulty, Some(defender_outcome), difficulty);
    debug!(direction = ?opposed.direction, degree = ?opposed.degree, "parry resolution");

    let mut wounds = Vec::new();
    let mut self_wounds = Vec::new();
    match opposed.direction {
        OutcomeDirection::Proponent => {
            let (hit, rebound) = apply_body_strike(
                attacker,
                defender,
                source,
                profile,
                opposed.degree,
                deflection_loss_multiplier(opposed.degree),
                target_part,
                1.0,
                ctx,
            );
            wounds = hit;
            self_wounds = rebound;
        }
        OutcomeDirection::Opponent | OutcomeDirection::Stalemate => {
            self_wounds = guard_holds(
                attacker,
                defender,
                source,
                profile,
                opposed.degree,
                GuardKind::ParryingWeapon { parry_hardness },
                ctx,
            );

            if opposed.direction == OutcomeDirection::Opponent
                && opposed.degree == OpposedOutcomeDegree::Total
            {
                resolve_disarm_attempt(attacker, defender, ctx, deltas);
            }
        }
    }

    Ok(CombatMoveResult {
        move_was_successful: opposed.proponent_won(),
        attacker_outcome: Some(att.outcome),
        defender_outcome: Some(defender_outcome),
        ward_succeeded: false,
        recovery_difficulty: recovery_for(attack, att.outcome, Some(defender_outcome)),
        wounds_caused: wounds,
        self_wounds_caused: self_wounds,
    })
}

/// Block: shield interposition; body and shield share the harm on a loss
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_block(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attack: &AttackMove,
    defense: &DefenseMove,
    att: AttackerCheck,
    source: &StrikeSource,
    target_part: Option<BodypartId>,
    ctx: &mut ResolutionContext,
    _deltas: &mut Vec<EffectDelta>,
) -> Result<CombatMoveResult> {
    let profile = required_profile(attack)?;
    let (block_bonus, shield_hardness) = match &defender.shield {
        Some(shield) => (shield.block_bonus, shield.material_density),
        None => return Err(CombatError::BlockWithoutShield(defender.id)),
    };

    let (defender_outcome, difficulty) = defense_check(
        attacker,
        defender,
        attack,
        defense,
        CheckType::BlockCheck,
        block_bonus,
        ctx,
    );
    let opposed =
        OpposedOutcome::compare(att.outcome, att.difficulty, Some(defender_outcome), difficulty);
    debug!(direction = ?opposed.direction, degree = ?opposed.degree, "block resolution");

    let mut wounds = Vec::new();
    let mut self_wounds = Vec::new();
    match opposed.direction {
        OutcomeDirection::Proponent => {
            let (hit, rebound) = apply_body_strike(
                attacker,
                defender,
                source,
                profile,
                opposed.degree,
                deflection_loss_multiplier(opposed.degree),
                target_part,
                1.0,
                ctx,
            );
            wounds = hit;
            self_wounds = rebound;

            // The shield still catches part of the blow: it suffers the
            // same damage value the body took.
            if let Some(wound) = wounds.first() {
                let shared = Damage {
                    origin: attacker.id,
                    tool: source.tool,
                    angle: profile.base_angle * deflection_loss_multiplier(opposed.degree),
                    bodypart: None,
                    amount: wound.amount,
                    damage_type: wound.damage_type,
                    pain: 0.0,
                    stun: 0.0,
                    penetration: None,
                    shock: 0.0,
                };
                if let Some(shield) = defender.shield.as_mut() {
                    ctx.wounds
                        .passive_suffer_item_damage(&mut shield.condition, &shared);
                }
            }
        }
        OutcomeDirection::Opponent | OutcomeDirection::Stalemate => {
            self_wounds = guard_holds(
                attacker,
                defender,
                source,
                profile,
                opposed.degree,
                GuardKind::Shield { shield_hardness },
                ctx,
            );
        }
    }

    Ok(CombatMoveResult {
        move_was_successful: opposed.proponent_won(),
        attacker_outcome: Some(att.outcome),
        defender_outcome: Some(defender_outcome),
        ward_succeeded: false,
        recovery_difficulty: recovery_for(attack, att.outcome, Some(defender_outcome)),
        wounds_caused: wounds,
        self_wounds_caused: self_wounds,
    })
}

enum GuardKind {
    ParryingWeapon { parry_hardness: f64 },
    Shield { shield_hardness: f64 },
}

/// A parry or block held: wear the guarding item, rebound onto the attacker
fn guard_holds(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    source: &StrikeSource,
    profile: &AttackProfile,
    degree: OpposedOutcomeDegree,
    guard: GuardKind,
    ctx: &mut ResolutionContext,
) -> Vec<Wound> {
    let (guard_hardness, wear_multiplier) = match &guard {
        GuardKind::ParryingWeapon { parry_hardness } => {
            (*parry_hardness, parry_wear_multiplier(degree))
        }
        GuardKind::Shield { shield_hardness } => (*shield_hardness, shield_wear_multiplier(degree)),
    };

    let origin = StrikeOrigin {
        actor: attacker.id,
        tool: source.tool,
        hardness: source.hardness,
        success_degrees: source.margin,
        striking_part: source.striking_part,
    };
    let target = StrikeTarget {
        part: None,
        hardness: guard_hardness,
    };
    let packets = compute_strike(
        profile,
        degree,
        source.quality,
        1.0,
        &origin,
        target,
        ctx.config.weapons_take_damage && source.rebounds,
    );

    let wear = Damage {
        amount: packets.to_target.amount * wear_multiplier,
        ..packets.to_target.clone()
    };
    match guard {
        GuardKind::ParryingWeapon { .. } => {
            if let Some(weapon) = defender.wielded.as_mut() {
                ctx.wounds
                    .passive_suffer_item_damage(&mut weapon.condition, &wear);
            }
        }
        GuardKind::Shield { .. } => {
            if let Some(shield) = defender.shield.as_mut() {
                ctx.wounds
                    .passive_suffer_item_damage(&mut shield.condition, &wear);
            }
        }
    }

    match &packets.to_attacker {
        Some(rebound) => apply_rebound(attacker, source, rebound, ctx),
        None => Vec::new(),
    }
}

/// Total parry: roll the disarm secondary, honoring the settings switch
fn resolve_disarm_attempt(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    ctx: &mut ResolutionContext,
    deltas: &mut Vec<EffectDelta>,
) {
    let outcome = ctx.checks.check(
        defender,
        CheckType::DisarmCheck,
        CheckDifficulty::Hard,
        Some(attacker),
        0.0,
    );
    if !outcome.is_pass() {
        return;
    }
    if ctx.config.disarm_on_total_parry {
        if let Some(weapon) = attacker.wielded.take() {
            debug!(weapon = %weapon.name, "disarmed by total parry");
            deltas.push(EffectDelta::Disarmed {
                actor: attacker.id,
                item: weapon.id,
                no_pickup_seconds: ctx.config.disarm_no_pickup_seconds,
            });
        }
    } else {
        attacker.grant_offensive_advantage(-ctx.config.forbidden_disarm_advantage_penalty);
    }
}

fn required_profile(attack: &AttackMove) -> Result<&AttackProfile> {
    attack.kind.profile().ok_or_else(|| CombatError::UnsupportedDefense {
        attack: attack.kind.name().to_string(),
        defense: "standard defense".to_string(),
    })
}
