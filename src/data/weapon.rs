//! Weapon profiles as listed on faction datacards

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ranged or melee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Ranged,
    Melee,
}

/// Rule parameter, numeric ("Piercing 1") or textual ("Range 6\"")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Number(n) => write!(f, "{}", n),
            RuleValue::Text(s) => f.write_str(s),
        }
    }
}

/// Special rule attached to a weapon profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,
    #[serde(default)]
    pub description: String,
}

/// Damage is usually a number but some profiles use text like "D3"
pub type Damage = RuleValue;

/// One firing or fighting mode of a weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub attacks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ballistic_skill: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_skill: Option<u32>,
    pub damage: Damage,
    pub critical_damage: Damage,
    #[serde(default)]
    pub special_rules: Vec<WeaponRule>,
}

impl WeaponProfile {
    /// Hit target regardless of weapon type
    pub fn hit_stat(&self) -> Option<u32> {
        self.ballistic_skill.or(self.weapon_skill)
    }
}

/// A weapon entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub profiles: Vec<WeaponProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
