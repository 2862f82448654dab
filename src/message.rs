//! Player-facing message formatting
//!
//! Purely cosmetic. Nothing here influences resolution; the driver feeds
//! resolved tuples in and gets prose out.

use crate::checks::Outcome;

/// Formats combat events into player-facing text
pub trait CombatMessenger {
    fn strike_message(
        &self,
        attacker: &str,
        defender: &str,
        tool: Option<&str>,
        attack_name: &str,
        outcome: Outcome,
        bodypart: Option<&str>,
    ) -> String;

    fn defense_message(&self, defender: &str, defense_name: &str, outcome: Outcome) -> String;
}

/// Plain English formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMessenger;

impl CombatMessenger for PlainMessenger {
    fn strike_message(
        &self,
        attacker: &str,
        defender: &str,
        tool: Option<&str>,
        attack_name: &str,
        outcome: Outcome,
        bodypart: Option<&str>,
    ) -> String {
        let with_tool = match tool {
            Some(tool) => format!(" with {}", tool),
            None => String::new(),
        };
        let location = match bodypart {
            Some(part) => format!(" at the {}", part),
            None => String::new(),
        };
        let verb = match outcome {
            Outcome::MajorPass => "lands squarely",
            Outcome::Pass => "connects",
            Outcome::MinorPass => "grazes",
            Outcome::MinorFail => "barely misses",
            Outcome::Fail => "misses",
            Outcome::MajorFail => "swings wide",
        };
        format!(
            "{} aims a {}{} at {}{} and {}.",
            attacker, attack_name, with_tool, defender, location, verb
        )
    }

    fn defense_message(&self, defender: &str, defense_name: &str, outcome: Outcome) -> String {
        let quality = match outcome {
            Outcome::MajorPass => "flawlessly",
            Outcome::Pass => "cleanly",
            Outcome::MinorPass => "barely",
            Outcome::MinorFail => "too slowly",
            Outcome::Fail => "poorly",
            Outcome::MajorFail => "hopelessly",
        };
        format!("{} attempts a {} {}.", defender, defense_name, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_message_mentions_participants() {
        let text = PlainMessenger.strike_message(
            "Aldric",
            "Berta",
            Some("an arming sword"),
            "slash",
            Outcome::Pass,
            Some("chest"),
        );
        assert!(text.contains("Aldric"));
        assert!(text.contains("Berta"));
        assert!(text.contains("chest"));
    }

    #[test]
    fn test_defense_message_varies_with_outcome() {
        let good = PlainMessenger.defense_message("Berta", "dodge", Outcome::MajorPass);
        let bad = PlainMessenger.defense_message("Berta", "dodge", Outcome::MajorFail);
        assert_ne!(good, bad);
    }
}
