//! Actors: bodies and combat-facing state

pub mod body;
pub mod combatant;

pub use body::{Alignment, BodyOrientation, Bodypart, Bodyplan};
pub use combatant::{Attributes, Combatant, Posture};
