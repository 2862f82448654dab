use crate::core::types::ActorId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Actor has no wound-capable body: {0:?}")]
    NoWoundCapableBody(ActorId),

    #[error("Defense {defense} is not a valid response to {attack}")]
    UnsupportedDefense { attack: String, defense: String },

    #[error("{0:?} attempted to parry without a wielded weapon")]
    ParryWithoutWeapon(ActorId),

    #[error("{0:?} attempted to block without a shield")]
    BlockWithoutShield(ActorId),

    #[error("{0:?} attempted a weapon move without a wielded weapon")]
    NoWieldedWeapon(ActorId),

    #[error("{0:?} attempted a ranged move without a ranged weapon")]
    NoRangedWeapon(ActorId),

    #[error("Formula error: {0}")]
    FormulaError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
