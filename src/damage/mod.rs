//! Damage values and the type taxonomy

pub mod pipeline;

use crate::checks::{CheckDifficulty, Outcome};
use crate::core::{ActorId, BodypartId, ItemId};
use serde::{Deserialize, Serialize};

/// What kind of harm a strike inflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Slashing,
    Crushing,
    Piercing,
    Ballistic,
    Burning,
    Electrical,
    Sonic,
    Wrenching,
    Hypoxia,
    Necrotic,
    Falling,
    /// Crushing delivered by an unarmed strike
    UnarmedCrushing,
}

impl DamageType {
    /// Difficulty of the penetration check for this damage type
    ///
    /// Piercing finds gaps easily; blunt force and exotic types do not
    /// penetrate in any meaningful sense.
    pub fn penetrate_difficulty(&self) -> CheckDifficulty {
        match self {
            DamageType::Piercing => CheckDifficulty::Easy,
            DamageType::Ballistic => CheckDifficulty::Normal,
            DamageType::Slashing => CheckDifficulty::Hard,
            DamageType::Burning => CheckDifficulty::VeryHard,
            DamageType::Crushing | DamageType::UnarmedCrushing => {
                CheckDifficulty::ExtremelyHard
            }
            DamageType::Electrical | DamageType::Sonic => CheckDifficulty::ExtremelyHard,
            DamageType::Hypoxia => CheckDifficulty::Insane,
            DamageType::Wrenching | DamageType::Necrotic | DamageType::Falling => {
                CheckDifficulty::Impossible
            }
        }
    }
}

/// A single packet of harm directed at one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub origin: ActorId,
    /// The item that dealt the harm, when one did
    pub tool: Option<ItemId>,
    /// Final angle of incidence in radians
    pub angle: f64,
    /// Struck bodypart; None for untargeted area effects
    pub bodypart: Option<BodypartId>,
    pub amount: f64,
    pub damage_type: DamageType,
    pub pain: f64,
    pub stun: f64,
    /// Result of the penetration check, once performed
    pub penetration: Option<Outcome>,
    pub shock: f64,
}

impl Damage {
    /// True when the packet would have no effect at all
    pub fn is_negligible(&self) -> bool {
        self.amount <= 0.0 && self.pain <= 0.0 && self.stun <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piercing_penetrates_easiest() {
        let all = [
            DamageType::Slashing,
            DamageType::Crushing,
            DamageType::Ballistic,
            DamageType::Burning,
            DamageType::Electrical,
            DamageType::Sonic,
            DamageType::Wrenching,
            DamageType::Hypoxia,
            DamageType::Necrotic,
            DamageType::Falling,
            DamageType::UnarmedCrushing,
        ];
        for other in all {
            assert!(
                DamageType::Piercing.penetrate_difficulty() <= other.penetrate_difficulty()
            );
        }
    }

    #[test]
    fn test_wrenching_never_penetrates() {
        assert_eq!(
            DamageType::Wrenching.penetrate_difficulty(),
            CheckDifficulty::Impossible
        );
        assert_eq!(
            DamageType::Falling.penetrate_difficulty(),
            CheckDifficulty::Impossible
        );
    }
}
