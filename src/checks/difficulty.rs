//! Check difficulty ladder
//!
//! Difficulties are a fixed ordered ladder. Moves stage difficulties up and
//! down the ladder rather than adding raw numbers.

use serde::{Deserialize, Serialize};

/// Nominal difficulty of a check
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CheckDifficulty {
    Automatic,
    Trivial,
    VeryEasy,
    Easy,
    Normal,
    Hard,
    VeryHard,
    ExtremelyHard,
    Insane,
    Impossible,
}

impl CheckDifficulty {
    /// The full ladder, easiest first
    pub fn all() -> [CheckDifficulty; 10] {
        [
            CheckDifficulty::Automatic,
            CheckDifficulty::Trivial,
            CheckDifficulty::VeryEasy,
            CheckDifficulty::Easy,
            CheckDifficulty::Normal,
            CheckDifficulty::Hard,
            CheckDifficulty::VeryHard,
            CheckDifficulty::ExtremelyHard,
            CheckDifficulty::Insane,
            CheckDifficulty::Impossible,
        ]
    }

    /// Position on the ladder (Automatic = 0, Impossible = 9)
    pub fn rank(&self) -> i32 {
        match self {
            CheckDifficulty::Automatic => 0,
            CheckDifficulty::Trivial => 1,
            CheckDifficulty::VeryEasy => 2,
            CheckDifficulty::Easy => 3,
            CheckDifficulty::Normal => 4,
            CheckDifficulty::Hard => 5,
            CheckDifficulty::VeryHard => 6,
            CheckDifficulty::ExtremelyHard => 7,
            CheckDifficulty::Insane => 8,
            CheckDifficulty::Impossible => 9,
        }
    }

    fn from_rank(rank: i32) -> CheckDifficulty {
        match rank.clamp(0, 9) {
            0 => CheckDifficulty::Automatic,
            1 => CheckDifficulty::Trivial,
            2 => CheckDifficulty::VeryEasy,
            3 => CheckDifficulty::Easy,
            4 => CheckDifficulty::Normal,
            5 => CheckDifficulty::Hard,
            6 => CheckDifficulty::VeryHard,
            7 => CheckDifficulty::ExtremelyHard,
            8 => CheckDifficulty::Insane,
            _ => CheckDifficulty::Impossible,
        }
    }

    /// Stage the difficulty up (harder), saturating at Impossible
    pub fn stage_up(&self, steps: i32) -> CheckDifficulty {
        CheckDifficulty::from_rank(self.rank() + steps)
    }

    /// Stage the difficulty down (easier), saturating at Automatic
    pub fn stage_down(&self, steps: i32) -> CheckDifficulty {
        CheckDifficulty::from_rank(self.rank() - steps)
    }

    /// Flat score modifier applied by the dice gateway
    ///
    /// Automatic and Impossible sit outside the normal band so that they
    /// always and never pass respectively.
    pub fn score_modifier(&self) -> f64 {
        match self {
            CheckDifficulty::Automatic => 1000.0,
            CheckDifficulty::Trivial => 30.0,
            CheckDifficulty::VeryEasy => 20.0,
            CheckDifficulty::Easy => 10.0,
            CheckDifficulty::Normal => 0.0,
            CheckDifficulty::Hard => -10.0,
            CheckDifficulty::VeryHard => -20.0,
            CheckDifficulty::ExtremelyHard => -30.0,
            CheckDifficulty::Insane => -50.0,
            CheckDifficulty::Impossible => -1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_ordering() {
        assert!(CheckDifficulty::Impossible > CheckDifficulty::Insane);
        assert!(CheckDifficulty::Hard > CheckDifficulty::Normal);
        assert!(CheckDifficulty::Normal > CheckDifficulty::Easy);
    }

    #[test]
    fn test_stage_up_saturates() {
        assert_eq!(
            CheckDifficulty::Insane.stage_up(5),
            CheckDifficulty::Impossible
        );
        assert_eq!(
            CheckDifficulty::Normal.stage_up(2),
            CheckDifficulty::VeryHard
        );
    }

    #[test]
    fn test_stage_down_saturates() {
        assert_eq!(
            CheckDifficulty::Trivial.stage_down(5),
            CheckDifficulty::Automatic
        );
        assert_eq!(CheckDifficulty::Hard.stage_down(1), CheckDifficulty::Normal);
    }

    #[test]
    fn test_rank_round_trip() {
        for difficulty in CheckDifficulty::all() {
            assert_eq!(difficulty.stage_up(0), difficulty);
        }
    }
}
