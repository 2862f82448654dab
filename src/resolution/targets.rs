//! Target bodypart selection
//!
//! Untargeted attacks land by weighted geometry matching the attack's
//! declared orientation and alignment. Declared targets degrade with the
//! attack outcome.

use crate::actor::body::{Alignment, BodyOrientation};
use crate::actor::Combatant;
use crate::checks::Outcome;
use crate::core::BodypartId;
use crate::moves::OffenseKind;
use crate::position::{Facing, FacingTracker};
use rand::rngs::StdRng;
use rand::Rng;

/// How strongly vital parts are favored for this strike
fn vital_bias(defenseless: bool, friendly: bool, configured_bias: f64) -> f64 {
    if defenseless && !friendly {
        configured_bias
    } else {
        1.0
    }
}

/// Random-geometry selection matching the attack's declared coordinates
///
/// The attacker's position on the target widens the reachable alignments:
/// a flanker also reaches that side, and an attacker at the rear reaches
/// everything.
fn random_geometry(
    defender: &Combatant,
    orientation: Option<BodyOrientation>,
    alignment: Option<Alignment>,
    attacker_facing: Facing,
    bias: f64,
    rng: &mut StdRng,
) -> Option<BodypartId> {
    defender.body.select_weighted(rng, bias, |part| {
        let orientation_ok = orientation
            .map(|wanted| part.orientation.adjacent_to(wanted))
            .unwrap_or(true);
        let alignment_ok = match attacker_facing {
            Facing::Rear => true,
            Facing::LeftFlank => {
                alignment.map(|wanted| part.alignment.matches(wanted)).unwrap_or(true)
                    || part.alignment == Alignment::Left
            }
            Facing::RightFlank => {
                alignment.map(|wanted| part.alignment.matches(wanted)).unwrap_or(true)
                    || part.alignment == Alignment::Right
            }
            Facing::Front => alignment
                .map(|wanted| part.alignment.matches(wanted))
                .unwrap_or(true),
        };
        orientation_ok && alignment_ok
    })
}

/// Pick the struck bodypart for one attack
#[allow(clippy::too_many_arguments)]
pub(crate) fn select_target_part(
    attacker: &Combatant,
    defender: &Combatant,
    kind: &OffenseKind,
    attacker_outcome: Outcome,
    defenseless: bool,
    friendly: bool,
    facing: &FacingTracker,
    configured_vital_bias: f64,
    rng: &mut StdRng,
) -> Option<BodypartId> {
    let profile = kind.profile();
    let orientation = profile.map(|p| p.orientation);
    let alignment = profile.map(|p| p.alignment);
    let attacker_facing = facing.facing(defender.id, attacker.id);
    let bias = vital_bias(defenseless, friendly, configured_vital_bias);

    // Clinch-range strikes always land by random geometry.
    let declared = if kind.is_clinch() {
        None
    } else {
        attacker.targeted_part
    };

    let Some(declared) = declared else {
        return random_geometry(defender, orientation, alignment, attacker_facing, bias, rng);
    };
    let Some(declared_part) = defender.body.get(declared) else {
        return random_geometry(defender, orientation, alignment, attacker_facing, bias, rng);
    };

    match attacker_outcome {
        // Exactly where the attacker wanted it.
        Outcome::MajorPass => Some(declared),
        // Same orientation and alignment, re-rolled.
        Outcome::Pass => {
            let wanted_orientation = declared_part.orientation;
            let wanted_alignment = declared_part.alignment;
            defender.body.select_weighted(rng, bias, |part| {
                part.orientation == wanted_orientation
                    && part.alignment.matches(wanted_alignment)
            })
        }
        // Drifted one band up or down.
        Outcome::MinorPass => {
            let shifted = if rng.gen_bool(0.5) {
                declared_part.orientation.shifted_up()
            } else {
                declared_part.orientation.shifted_down()
            };
            defender
                .body
                .select_weighted(rng, bias, |part| part.orientation == shifted)
        }
        // A miss is landing wherever geometry says, if it lands at all.
        _ => random_geometry(defender, orientation, alignment, attacker_facing, bias, rng),
    }
}

/// Pick a vital part for an execution strike
pub(crate) fn select_vital_part(defender: &Combatant, rng: &mut StdRng) -> Option<BodypartId> {
    defender.body.select_weighted(rng, 1.0, |part| part.vital)
}
