//! Weapons, shields, and natural attacks

use crate::core::ItemId;
use crate::gear::profiles::{AttackProfile, ItemQuality};
use serde::{Deserialize, Serialize};

/// Distance category, determines ward reach adjustments
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum WeaponReach {
    Grapple,
    #[default]
    Short,
    Medium,
    Long,
    Pike,
}

impl WeaponReach {
    /// Numeric step count for reach comparisons
    pub fn steps(&self) -> i32 {
        match self {
            WeaponReach::Grapple => 0,
            WeaponReach::Short => 1,
            WeaponReach::Medium => 2,
            WeaponReach::Long => 3,
            WeaponReach::Pike => 4,
        }
    }
}

/// Wear state shared by weapons and shields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemCondition {
    /// 1.0 is pristine, 0.0 is ruined
    pub value: f64,
    /// How much raw damage one full point of condition absorbs
    pub durability: f64,
}

impl ItemCondition {
    pub fn pristine(durability: f64) -> Self {
        Self {
            value: 1.0,
            durability,
        }
    }

    /// Apply wear from a raw damage amount
    pub fn wear(&mut self, amount: f64) {
        if self.durability <= 0.0 {
            self.value = 0.0;
            return;
        }
        self.value = (self.value - amount / self.durability).max(0.0);
    }

    pub fn is_ruined(&self) -> bool {
        self.value <= 0.0
    }
}

/// A wieldable melee weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: ItemId,
    pub name: String,
    pub quality: ItemQuality,
    /// Material density, for relative hardness
    pub material_density: f64,
    pub reach: WeaponReach,
    /// Flat bonus to parry checks made with this weapon
    pub parry_bonus: f64,
    pub condition: ItemCondition,
    pub attacks: Vec<AttackProfile>,
}

impl Weapon {
    /// Common weapon: arming sword
    pub fn arming_sword() -> Self {
        Self {
            id: ItemId::new(),
            name: "arming sword".to_string(),
            quality: ItemQuality::Standard,
            material_density: 7.8,
            reach: WeaponReach::Short,
            parry_bonus: 10.0,
            condition: ItemCondition::pristine(100.0),
            attacks: vec![AttackProfile::sword_slash(), AttackProfile::sword_thrust()],
        }
    }

    /// Common weapon: mace
    pub fn mace() -> Self {
        Self {
            id: ItemId::new(),
            name: "mace".to_string(),
            quality: ItemQuality::Standard,
            material_density: 8.5,
            reach: WeaponReach::Short,
            parry_bonus: 0.0,
            condition: ItemCondition::pristine(140.0),
            attacks: vec![AttackProfile::mace_swing()],
        }
    }

    /// Common weapon: spear
    pub fn spear() -> Self {
        Self {
            id: ItemId::new(),
            name: "spear".to_string(),
            quality: ItemQuality::Standard,
            material_density: 5.0,
            reach: WeaponReach::Long,
            parry_bonus: 5.0,
            condition: ItemCondition::pristine(80.0),
            attacks: vec![AttackProfile::sword_thrust()],
        }
    }

    /// First attack profile, the weapon's signature strike
    pub fn primary_attack(&self) -> Option<&AttackProfile> {
        self.attacks.first()
    }
}

/// A shield usable for blocking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub id: ItemId,
    pub name: String,
    pub material_density: f64,
    /// Flat bonus to block checks made with this shield
    pub block_bonus: f64,
    pub condition: ItemCondition,
}

impl Shield {
    /// Common shield: round wooden shield
    pub fn round_shield() -> Self {
        Self {
            id: ItemId::new(),
            name: "round shield".to_string(),
            material_density: 0.9,
            block_bonus: 15.0,
            condition: ItemCondition::pristine(120.0),
        }
    }
}

/// An unarmed strike delivered by a bodypart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalAttack {
    pub name: String,
    /// Bodypart that delivers the strike (takes the self damage)
    pub striking_part: String,
    pub profile: AttackProfile,
}

impl NaturalAttack {
    pub fn punch() -> Self {
        Self {
            name: "punch".to_string(),
            striking_part: "right hand".to_string(),
            profile: AttackProfile::punch(),
        }
    }

    pub fn kick() -> Self {
        Self {
            name: "kick".to_string(),
            striking_part: "right leg".to_string(),
            profile: AttackProfile::kick(),
        }
    }
}

/// A ranged weapon; firing consumes its loaded state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangedWeapon {
    pub id: ItemId,
    pub name: String,
    pub quality: ItemQuality,
    pub material_density: f64,
    pub loaded: bool,
    pub profile: AttackProfile,
}

impl RangedWeapon {
    /// Common ranged weapon: shortbow
    pub fn shortbow() -> Self {
        Self {
            id: ItemId::new(),
            name: "shortbow".to_string(),
            quality: ItemQuality::Standard,
            material_density: 4.0,
            loaded: true,
            profile: AttackProfile::bow_shot(),
        }
    }
}
