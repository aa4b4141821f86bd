//! Faction data model and loading

pub mod equipment;
pub mod faction;
pub mod loader;
pub mod operative;
pub mod weapon;

pub use equipment::{
    combine_equipment, filter_equipment_by_keywords, load_universal_equipment, Equipment,
    EquipmentCategory,
};
pub use faction::{
    Ability, CompositionRules, Faction, FactionMetadata, FactionRule, SelectionLimits,
    TeamRestrictions,
};
pub use loader::{load_faction, parse_faction, validate_faction, FactionId, FactionRegistry};
pub use operative::{
    AlternativeLoadout, Operative, OperativeStats, SlotValue, WeaponConfig, WeaponOptions,
};
pub use weapon::{RuleValue, Weapon, WeaponProfile, WeaponRule, WeaponType};
