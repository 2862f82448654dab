//! Finisher secondary checks
//!
//! A finisher re-uses its base attack's full resolution, then rolls one
//! additional check to layer a knockdown, stagger, or balance penalty on a
//! connected hit.

use crate::actor::{Combatant, Posture};
use crate::effects::{EffectDelta, ScheduleClass};
use crate::moves::FinisherKind;
use crate::resolution::ResolutionContext;
use tracing::debug;

/// Roll and apply the finisher's secondary effect
///
/// Only called when the base attack landed. The external bonus and which
/// side it favors come from configuration, never from engine logic.
pub(crate) fn resolve_finisher(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    finisher: FinisherKind,
    ctx: &mut ResolutionContext,
    deltas: &mut Vec<EffectDelta>,
) {
    let bonus = if ctx.config.finisher.bonus_favors_attacker {
        ctx.config.finisher.external_bonus
    } else {
        -ctx.config.finisher.external_bonus
    };

    let outcome = ctx.checks.check(
        attacker,
        finisher.check_type(),
        finisher.difficulty(),
        Some(defender),
        bonus,
    );
    if !outcome.is_pass() {
        return;
    }
    debug!(?finisher, ?outcome, "finisher landed");

    match finisher {
        FinisherKind::StaggeringBlow => {
            deltas.push(EffectDelta::Staggered {
                actor: defender.id,
                seconds: ctx.config.stagger_seconds,
            });
            deltas.push(EffectDelta::ScheduleDelay {
                actor: defender.id,
                class: ScheduleClass::Stun,
                seconds: ctx.config.stun_window_seconds,
            });
        }
        FinisherKind::UnbalancingBlow => {
            defender.grant_defensive_advantage(-ctx.config.unbalance_defensive_penalty);
        }
        FinisherKind::Takedown => {
            defender.posture = Posture::Prone;
            deltas.push(EffectDelta::ScheduleDelay {
                actor: defender.id,
                class: ScheduleClass::Stun,
                seconds: ctx.config.stun_window_seconds,
            });
        }
    }
}
