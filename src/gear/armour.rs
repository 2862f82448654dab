//! Worn armour, consulted for relative hardness at the struck location

use serde::{Deserialize, Serialize};

/// A worn armour piece covering named bodyparts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armour {
    pub name: String,
    pub material_density: f64,
    pub covers: Vec<String>,
}

impl Armour {
    pub fn covers_part(&self, part_name: &str) -> bool {
        self.covers.iter().any(|covered| covered == part_name)
    }

    /// Common armour: leather jack (torso and arms)
    pub fn leather_jack() -> Self {
        Self {
            name: "leather jack".to_string(),
            material_density: 0.95,
            covers: vec![
                "chest".to_string(),
                "abdomen".to_string(),
                "right arm".to_string(),
                "left arm".to_string(),
            ],
        }
    }

    /// Common armour: mail hauberk (torso, arms, upper legs)
    pub fn mail_hauberk() -> Self {
        Self {
            name: "mail hauberk".to_string(),
            material_density: 7.8,
            covers: vec![
                "chest".to_string(),
                "abdomen".to_string(),
                "right arm".to_string(),
                "left arm".to_string(),
                "right leg".to_string(),
                "left leg".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leather_covers_chest_not_head() {
        let jack = Armour::leather_jack();
        assert!(jack.covers_part("chest"));
        assert!(!jack.covers_part("head"));
    }

    #[test]
    fn test_mail_denser_than_leather() {
        assert!(Armour::mail_hauberk().material_density > Armour::leather_jack().material_density);
    }
}
