//! Core identifiers and the crate-wide error type

pub mod error;
pub mod types;

pub use error::{CombatError, Result};
pub use types::{ActorId, BodypartId, ItemId};
