//! Combatant state: everything the engine needs to know about one actor
//!
//! This is the engine-facing slice of an actor, not a full character model.
//! The surrounding simulation owns identity, inventory, and progression.

use crate::actor::body::{Bodypart, Bodyplan};
use crate::checks::CheckType;
use crate::core::{ActorId, BodypartId};
use crate::gear::{Armour, NaturalAttack, RangedWeapon, Shield, Weapon};
use crate::stamina::{ExertionLevel, SecondWindState};
use crate::wounds::Wound;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Physical attributes consulted by the stamina cost model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: f64,
    pub grace: f64,
    pub power: f64,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 50.0,
            grace: 50.0,
            power: 50.0,
        }
    }
}

/// Gross body position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Posture {
    #[default]
    Standing,
    Prone,
}

/// One combat-capable actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: ActorId,
    pub name: String,
    pub body: Bodyplan,
    pub attributes: Attributes,
    /// Check ratings; unlisted checks fall back to a baseline of 50
    pub skills: AHashMap<CheckType, f64>,
    pub stamina: f64,
    pub max_stamina: f64,
    pub exertion: ExertionLevel,
    offensive_advantage: f64,
    defensive_advantage: f64,
    pub posture: Posture,
    pub wielded: Option<Weapon>,
    pub shield: Option<Shield>,
    pub ranged: Option<RangedWeapon>,
    pub natural_attacks: Vec<NaturalAttack>,
    pub armour: Option<Armour>,
    pub second_wind: SecondWindState,
    /// Standing preference for where this actor aims
    pub targeted_part: Option<BodypartId>,
    /// Wounds recorded by the wound subsystem
    pub wounds: Vec<Wound>,
}

impl Combatant {
    pub fn new(name: &str) -> Self {
        Self {
            id: ActorId::new(),
            name: name.to_string(),
            body: Bodyplan::humanoid(),
            attributes: Attributes::default(),
            skills: AHashMap::new(),
            stamina: 100.0,
            max_stamina: 100.0,
            exertion: ExertionLevel::Resting,
            offensive_advantage: 0.0,
            defensive_advantage: 0.0,
            posture: Posture::Standing,
            wielded: None,
            shield: None,
            ranged: None,
            natural_attacks: vec![NaturalAttack::punch(), NaturalAttack::kick()],
            armour: None,
            second_wind: SecondWindState::default(),
            targeted_part: None,
            wounds: Vec::new(),
        }
    }

    /// Rating for a check type, with the unskilled baseline
    pub fn skill(&self, check: CheckType) -> f64 {
        self.skills.get(&check).copied().unwrap_or(50.0)
    }

    pub fn set_skill(&mut self, check: CheckType, rating: f64) {
        self.skills.insert(check, rating);
    }

    pub fn grant_offensive_advantage(&mut self, amount: f64) {
        self.offensive_advantage += amount;
    }

    pub fn grant_defensive_advantage(&mut self, amount: f64) {
        self.defensive_advantage += amount;
    }

    /// Consume the accumulated offensive advantage, zeroing it
    pub fn take_offensive_advantage(&mut self) -> f64 {
        std::mem::take(&mut self.offensive_advantage)
    }

    /// Consume the accumulated defensive advantage, zeroing it
    pub fn take_defensive_advantage(&mut self) -> f64 {
        std::mem::take(&mut self.defensive_advantage)
    }

    /// Peek without consuming (driver-side AI only)
    pub fn offensive_advantage(&self) -> f64 {
        self.offensive_advantage
    }

    pub fn defensive_advantage(&self) -> f64 {
        self.defensive_advantage
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.stamina >= cost
    }

    pub fn spend_stamina(&mut self, cost: f64) {
        self.stamina = (self.stamina - cost).max(0.0);
    }

    pub fn restore_stamina_to_max(&mut self) {
        self.stamina = self.max_stamina;
    }

    /// Ratchet exertion up to at least `level`
    pub fn raise_exertion(&mut self, level: ExertionLevel) {
        if level > self.exertion {
            self.exertion = level;
        }
    }

    /// Effective material density at a struck part
    ///
    /// Armour covering the part shields it with the harder of the two
    /// densities.
    pub fn hardness_at(&self, part: &Bodypart) -> f64 {
        match &self.armour {
            Some(armour) if armour.covers_part(&part.name) => {
                armour.material_density.max(part.natural_hardness)
            }
            _ => part.natural_hardness,
        }
    }

    /// Test combatant: sword-and-nothing fighter
    pub fn test_swordsman() -> Self {
        let mut combatant = Self::new("swordsman");
        combatant.wielded = Some(Weapon::arming_sword());
        combatant
    }

    /// Test combatant: sword and round shield
    pub fn test_shield_fighter() -> Self {
        let mut combatant = Self::new("shield fighter");
        combatant.wielded = Some(Weapon::arming_sword());
        combatant.shield = Some(Shield::round_shield());
        combatant
    }

    /// Test combatant: unarmed brawler
    pub fn test_brawler() -> Self {
        Self::new("brawler")
    }

    /// Test combatant: archer with a loaded shortbow
    pub fn test_archer() -> Self {
        let mut combatant = Self::new("archer");
        combatant.ranged = Some(RangedWeapon::shortbow());
        combatant
    }

    /// Test combatant: spearman in a leather jack
    pub fn test_spearman() -> Self {
        let mut combatant = Self::new("spearman");
        combatant.wielded = Some(Weapon::spear());
        combatant.armour = Some(Armour::leather_jack());
        combatant
    }
}
