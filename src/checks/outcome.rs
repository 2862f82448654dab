//! Six-level check outcome scale
//!
//! Every probabilistic check resolves to one of six outcomes. The numeric
//! encodings here feed the opposed comparison and recovery staging.

use serde::{Deserialize, Serialize};

/// Result of a single check against a difficulty
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Outcome {
    MajorFail,
    Fail,
    MinorFail,
    MinorPass,
    Pass,
    MajorPass,
}

impl Outcome {
    /// All outcomes, worst first
    pub fn all() -> [Outcome; 6] {
        [
            Outcome::MajorFail,
            Outcome::Fail,
            Outcome::MinorFail,
            Outcome::MinorPass,
            Outcome::Pass,
            Outcome::MajorPass,
        ]
    }

    /// Did the check pass at all?
    pub fn is_pass(&self) -> bool {
        *self >= Outcome::MinorPass
    }

    /// Signed distance from minimum success
    ///
    /// Passes encode as +1..+3, fails as -1..-3. The opposed comparison
    /// works on the gap between two of these values.
    pub fn check_degrees(&self) -> i32 {
        match self {
            Outcome::MajorFail => -3,
            Outcome::Fail => -2,
            Outcome::MinorFail => -1,
            Outcome::MinorPass => 1,
            Outcome::Pass => 2,
            Outcome::MajorPass => 3,
        }
    }

    /// How many degrees of success (zero for any failure)
    pub fn success_degrees(&self) -> i32 {
        self.check_degrees().max(0)
    }

    /// How many degrees of failure (zero for any success)
    pub fn failure_degrees(&self) -> i32 {
        (-self.check_degrees()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_total_order() {
        assert!(Outcome::MajorPass > Outcome::Pass);
        assert!(Outcome::Pass > Outcome::MinorPass);
        assert!(Outcome::MinorPass > Outcome::MinorFail);
        assert!(Outcome::MinorFail > Outcome::Fail);
        assert!(Outcome::Fail > Outcome::MajorFail);
    }

    #[test]
    fn test_pass_threshold() {
        assert!(Outcome::MinorPass.is_pass());
        assert!(Outcome::MajorPass.is_pass());
        assert!(!Outcome::MinorFail.is_pass());
        assert!(!Outcome::MajorFail.is_pass());
    }

    #[test]
    fn test_check_degrees_are_signed() {
        assert_eq!(Outcome::MajorPass.check_degrees(), 3);
        assert_eq!(Outcome::MinorPass.check_degrees(), 1);
        assert_eq!(Outcome::MinorFail.check_degrees(), -1);
        assert_eq!(Outcome::MajorFail.check_degrees(), -3);
    }

    #[test]
    fn test_success_and_failure_degrees() {
        assert_eq!(Outcome::Pass.success_degrees(), 2);
        assert_eq!(Outcome::Pass.failure_degrees(), 0);
        assert_eq!(Outcome::Fail.success_degrees(), 0);
        assert_eq!(Outcome::Fail.failure_degrees(), 2);
    }
}
