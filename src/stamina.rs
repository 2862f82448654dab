//! Stamina costs and exertion bookkeeping
//!
//! Every move carries a base stamina cost from content data; the actual
//! spend scales with the actor's relevant attribute. Exertion only ratchets
//! upward during an exchange.

use serde::{Deserialize, Serialize};

/// Exertion level an action drives an actor to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ExertionLevel {
    #[default]
    Resting,
    Light,
    Moderate,
    Heavy,
    VeryHeavy,
    Maximum,
}

/// Attribute-relative cost multiplier
///
/// An actor at the pivot rating pays the listed cost; weaker actors pay
/// more, stronger actors less, clamped to a factor of two either way.
pub fn relative_cost_multiplier(rating: f64, pivot: f64) -> f64 {
    if rating <= 0.0 {
        return 2.0;
    }
    (pivot / rating).clamp(0.5, 2.0)
}

/// One-shot stamina recovery available to some actors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecondWindState {
    pub available: bool,
}

impl SecondWindState {
    pub fn fresh() -> Self {
        Self { available: true }
    }

    /// Consume the second wind if it is still available
    pub fn try_consume(&mut self) -> bool {
        if self.available {
            self.available = false;
            true
        } else {
            false
        }
    }
}
