//! Load faction data from JSON files
//!
//! Faction files live at `<data_dir>/factions/<faction-id>/faction.json`.
//! `FactionRegistry` loads every known faction once and hands out borrows.

use crate::core::error::{Result, RosterError};
use crate::data::faction::Faction;
use ahash::AHashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The factions this tool ships data for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactionId {
    AngelsOfDeath,
    PlagueMarines,
}

impl FactionId {
    pub const ALL: [FactionId; 2] = [FactionId::AngelsOfDeath, FactionId::PlagueMarines];

    pub fn as_str(self) -> &'static str {
        match self {
            FactionId::AngelsOfDeath => "angels-of-death",
            FactionId::PlagueMarines => "plague-marines",
        }
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactionId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        FactionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RosterError::UnknownFaction(s.to_string()))
    }
}

/// Structural check on raw faction JSON.
///
/// Requires non-empty `id`, `name` and `description`, array `rules`,
/// `operatives`, `weapons` and `abilities`, and present `restrictions`
/// and `metadata`.
pub fn validate_faction(value: &serde_json::Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    let non_empty_str = |key: &str| {
        obj.get(key)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.is_empty())
    };
    let is_array = |key: &str| obj.get(key).is_some_and(|v| v.is_array());
    let present = |key: &str| obj.get(key).is_some_and(|v| !v.is_null());

    non_empty_str("id")
        && non_empty_str("name")
        && non_empty_str("description")
        && is_array("rules")
        && is_array("operatives")
        && is_array("weapons")
        && is_array("abilities")
        && present("restrictions")
        && present("metadata")
}

/// Parse and validate a faction from a JSON string
pub fn parse_faction(json: &str) -> Result<Faction> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !validate_faction(&value) {
        let id = value
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>")
            .to_string();
        return Err(RosterError::InvalidFaction(id));
    }
    Ok(serde_json::from_value(value)?)
}

fn faction_path(data_dir: &Path, id: FactionId) -> PathBuf {
    data_dir
        .join("factions")
        .join(id.as_str())
        .join("faction.json")
}

/// Load a single faction from the data directory
pub fn load_faction(data_dir: &Path, id: FactionId) -> Result<Faction> {
    let path = faction_path(data_dir, id);
    let content = std::fs::read_to_string(&path)?;
    let faction = parse_faction(&content)?;
    tracing::info!(
        "Loaded faction {} ({} operatives) from {}",
        faction.name,
        faction.operatives.len(),
        path.display()
    );
    Ok(faction)
}

/// All factions found in a data directory
#[derive(Debug, Default)]
pub struct FactionRegistry {
    factions: AHashMap<FactionId, Faction>,
}

impl FactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every known faction present under `data_dir`.
    ///
    /// Missing files are skipped. Files that exist but fail to parse or
    /// validate are errors.
    pub fn load_directory(data_dir: &Path) -> Result<Self> {
        let mut registry = Self::new();
        for id in FactionId::ALL {
            if !faction_path(data_dir, id).exists() {
                tracing::warn!("No data for faction {} in {}", id, data_dir.display());
                continue;
            }
            let faction = load_faction(data_dir, id)?;
            registry.insert(id, faction);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, id: FactionId, faction: Faction) {
        self.factions.insert(id, faction);
    }

    pub fn get(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(&id)
    }

    /// Look up by the string id used in saved state
    pub fn get_by_str(&self, id: &str) -> Result<&Faction> {
        let faction_id: FactionId = id.parse()?;
        self.get(faction_id)
            .ok_or_else(|| RosterError::UnknownFaction(id.to_string()))
    }

    /// `(id, display name)` for every loaded faction, in enumeration order
    pub fn faction_list(&self) -> Vec<(FactionId, &str)> {
        FactionId::ALL
            .into_iter()
            .filter_map(|id| self.get(id).map(|f| (id, f.name.as_str())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_faction() -> serde_json::Value {
        json!({
            "id": "angels-of-death",
            "name": "Angels of Death",
            "description": "Test",
            "rules": [],
            "operatives": [],
            "weapons": [],
            "abilities": [],
            "restrictions": {"maxOperatives": 6},
            "metadata": {"version": "1.0.0", "source": "Test", "lastUpdated": "2024-01-01"}
        })
    }

    #[test]
    fn test_validate_correct_faction() {
        assert!(validate_faction(&minimal_faction()));
    }

    #[test]
    fn test_validate_rejects_non_object() {
        assert!(!validate_faction(&json!(null)));
        assert!(!validate_faction(&json!("faction")));
        assert!(!validate_faction(&json!({"id": "test"})));
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut value = minimal_faction();
        value.as_object_mut().unwrap().remove("operatives");
        assert!(!validate_faction(&value));

        let mut value = minimal_faction();
        value["name"] = json!("");
        assert!(!validate_faction(&value));
    }

    #[test]
    fn test_parse_faction_reports_invalid_id() {
        let err = parse_faction(r#"{"id": "broken"}"#).unwrap_err();
        assert!(matches!(err, RosterError::InvalidFaction(id) if id == "broken"));
    }

    #[test]
    fn test_faction_id_round_trip() {
        for id in FactionId::ALL {
            assert_eq!(id.as_str().parse::<FactionId>().unwrap(), id);
        }
        assert!("orks".parse::<FactionId>().is_err());
    }

    #[test]
    fn test_registry_lookup_by_str() {
        let mut registry = FactionRegistry::new();
        let faction: Faction = serde_json::from_value(minimal_faction()).unwrap();
        registry.insert(FactionId::AngelsOfDeath, faction);

        assert_eq!(registry.get_by_str("angels-of-death").unwrap().name, "Angels of Death");
        assert!(registry.get_by_str("plague-marines").is_err());
        assert_eq!(
            registry.faction_list(),
            vec![(FactionId::AngelsOfDeath, "Angels of Death")]
        );
    }

    #[test]
    fn test_load_bundled_data() {
        let data_dir = Path::new("data");
        if data_dir.exists() {
            let registry = FactionRegistry::load_directory(data_dir).unwrap();
            assert_eq!(registry.len(), FactionId::ALL.len());
        }
    }
}
