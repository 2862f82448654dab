//! Facing state machine
//!
//! Each directed (subject, opponent) pair may carry one facing entry
//! describing where the opponent stands relative to the subject. No entry
//! means Front. Defense checks are staged up when the subject is being
//! attacked from a flank or the rear.

use crate::core::ActorId;
use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where an opponent stands relative to a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    #[default]
    Front,
    LeftFlank,
    RightFlank,
    Rear,
}

impl Facing {
    /// Difficulty stages added to the subject's defense checks
    pub fn defense_penalty_stages(&self) -> i32 {
        match self {
            Facing::Front => 0,
            Facing::LeftFlank | Facing::RightFlank => 2,
            Facing::Rear => 4,
        }
    }

    pub fn is_flank(&self) -> bool {
        matches!(self, Facing::LeftFlank | Facing::RightFlank)
    }
}

/// Per-encounter store of facing entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacingTracker {
    entries: AHashMap<(ActorId, ActorId), Facing>,
}

fn random_flank<R: Rng>(rng: &mut R) -> Facing {
    if rng.gen_bool(0.5) {
        Facing::LeftFlank
    } else {
        Facing::RightFlank
    }
}

impl FacingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current facing of `opponent` relative to `subject`
    pub fn facing(&self, subject: ActorId, opponent: ActorId) -> Facing {
        self.entries
            .get(&(subject, opponent))
            .copied()
            .unwrap_or(Facing::Front)
    }

    /// Degrade the subject's position against an opponent
    ///
    /// Front picks up a random flank, a flank decays to Rear, and Rear ends
    /// the entry (the subject recovers to neutral; a further worsen starts
    /// the cycle again from a random flank).
    pub fn worsen<R: Rng>(&mut self, subject: ActorId, opponent: ActorId, rng: &mut R) {
        let key = (subject, opponent);
        match self.facing(subject, opponent) {
            Facing::Front => {
                self.entries.insert(key, random_flank(rng));
            }
            Facing::LeftFlank | Facing::RightFlank => {
                self.entries.insert(key, Facing::Rear);
            }
            Facing::Rear => {
                self.entries.remove(&key);
            }
        }
    }

    /// Reward the opponent with position on the subject
    ///
    /// Used when a defender earns a perfect result: from neutral the
    /// opponent gains a random flank, an existing flank upgrades to Rear,
    /// and Rear stays Rear. Never moves toward Front.
    pub fn outflank<R: Rng>(&mut self, subject: ActorId, opponent: ActorId, rng: &mut R) {
        let key = (subject, opponent);
        match self.facing(subject, opponent) {
            Facing::Front => {
                self.entries.insert(key, random_flank(rng));
            }
            Facing::LeftFlank | Facing::RightFlank => {
                self.entries.insert(key, Facing::Rear);
            }
            Facing::Rear => {}
        }
    }

    /// Clear the pair back to neutral
    pub fn reset(&mut self, subject: ActorId, opponent: ActorId) {
        self.entries.remove(&(subject, opponent));
    }

    /// Stages added to `defender`'s defense against `attacker`
    pub fn defense_penalty_stages(&self, defender: ActorId, attacker: ActorId) -> i32 {
        self.facing(defender, attacker).defense_penalty_stages()
    }
}
