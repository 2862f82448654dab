//! Equipment property structs consumed by the resolution engine

pub mod armour;
pub mod profiles;
pub mod weapons;

pub use armour::Armour;
pub use profiles::{AttackProfile, ItemQuality};
pub use weapons::{ItemCondition, NaturalAttack, RangedWeapon, Shield, Weapon, WeaponReach};
