//! Equipment: universal items plus faction-specific ones

use crate::core::error::Result;
use crate::data::weapon::{WeaponProfile, WeaponRule, WeaponType};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCategory {
    /// Available to every faction
    Universal,
    Faction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentEffect {
    /// e.g. "terrain", "weapon_modification"
    #[serde(rename = "type")]
    pub effect_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weapon_rules: Vec<WeaponRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_weapons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: EquipmentCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EquipmentEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_profile: Option<WeaponProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_type: Option<WeaponType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<String>,
    /// Only operatives carrying one of these keywords may use it
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_to_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// Read universal equipment from `<data_dir>/equipment/universal.json`.
///
/// A missing file yields no items.
pub fn load_universal_equipment(data_dir: &Path) -> Result<Vec<Equipment>> {
    let path = data_dir.join("equipment").join("universal.json");
    if !path.exists() {
        tracing::warn!("No universal equipment at {}", path.display());
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)?;
    let items: Vec<Equipment> = serde_json::from_str(&content)?;
    tracing::info!("Loaded {} universal equipment items", items.len());
    Ok(items)
}

/// Universal items first, then the faction's own
pub fn combine_equipment(universal: &[Equipment], faction: &[Equipment]) -> Vec<Equipment> {
    universal.iter().chain(faction.iter()).cloned().collect()
}

/// Items usable by an operative with the given keywords
pub fn filter_equipment_by_keywords<'a>(
    equipment: &'a [Equipment],
    keywords: &[String],
) -> Vec<&'a Equipment> {
    equipment
        .iter()
        .filter(|item| {
            item.restricted_to_keywords.is_empty()
                || item
                    .restricted_to_keywords
                    .iter()
                    .any(|required| keywords.contains(required))
        })
        .collect()
}
