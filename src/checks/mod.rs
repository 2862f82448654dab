//! Checks: outcomes, difficulties, opposed comparison, and the dice boundary

pub mod difficulty;
pub mod gateway;
pub mod opposed;
pub mod outcome;

pub use difficulty::CheckDifficulty;
pub use gateway::{CheckGateway, CheckType, DiceGateway, ScriptedGateway};
pub use opposed::{OpposedOutcome, OpposedOutcomeDegree, OutcomeDirection};
pub use outcome::Outcome;
