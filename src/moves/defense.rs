//! Defense move kinds

use crate::checks::CheckType;
use crate::config::RuleConfiguration;
use crate::stamina::ExertionLevel;
use serde::{Deserialize, Serialize};

/// Every defender response the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseKind {
    /// No defense at all
    Helpless,
    /// Wants to defend but cannot afford to
    TooExhausted,
    Dodge,
    /// Requires a wielded weapon
    Parry,
    /// Requires a shield
    Block,
    /// Pre-emptive interception, resolved before the normal branch
    Ward,
    /// Wrestling response to grapple moves
    CounterGrapple,
}

impl DefenseKind {
    /// The check this defense rolls, None for untested kinds
    pub fn check_type(&self) -> Option<CheckType> {
        match self {
            DefenseKind::Helpless | DefenseKind::TooExhausted => None,
            DefenseKind::Dodge => Some(CheckType::DodgeCheck),
            DefenseKind::Parry => Some(CheckType::ParryCheck),
            DefenseKind::Block => Some(CheckType::BlockCheck),
            DefenseKind::Ward => Some(CheckType::WardCheck),
            DefenseKind::CounterGrapple => Some(CheckType::CounterGrappleCheck),
        }
    }

    /// Exertion this defense drives the defender to
    pub fn exertion(&self) -> ExertionLevel {
        match self {
            DefenseKind::Helpless => ExertionLevel::Resting,
            DefenseKind::TooExhausted => ExertionLevel::Light,
            DefenseKind::Dodge => ExertionLevel::Heavy,
            DefenseKind::Parry => ExertionLevel::Moderate,
            DefenseKind::Block => ExertionLevel::Moderate,
            DefenseKind::Ward => ExertionLevel::Moderate,
            DefenseKind::CounterGrapple => ExertionLevel::Heavy,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DefenseKind::Helpless => "helpless",
            DefenseKind::TooExhausted => "too exhausted",
            DefenseKind::Dodge => "dodge",
            DefenseKind::Parry => "parry",
            DefenseKind::Block => "block",
            DefenseKind::Ward => "ward",
            DefenseKind::CounterGrapple => "counter-grapple",
        }
    }

    /// Base stamina cost before context multipliers
    pub fn base_stamina(&self, config: &RuleConfiguration) -> f64 {
        match self {
            DefenseKind::Helpless | DefenseKind::TooExhausted => 0.0,
            DefenseKind::Dodge => config.defense_stamina.dodge,
            DefenseKind::Parry => config.defense_stamina.parry,
            DefenseKind::Block => config.defense_stamina.block,
            DefenseKind::Ward => config.defense_stamina.ward,
            DefenseKind::CounterGrapple => config.defense_stamina.counter_grapple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untested_kinds_have_no_check() {
        assert!(DefenseKind::Helpless.check_type().is_none());
        assert!(DefenseKind::TooExhausted.check_type().is_none());
        assert!(DefenseKind::Dodge.check_type().is_some());
    }

    #[test]
    fn test_free_defenses_cost_nothing() {
        let config = RuleConfiguration::default();
        assert_eq!(DefenseKind::Helpless.base_stamina(&config), 0.0);
        assert!(DefenseKind::Dodge.base_stamina(&config) > 0.0);
    }
}
