//! Faction definitions and roster restrictions

use crate::data::equipment::Equipment;
use crate::data::operative::Operative;
use crate::data::weapon::Weapon;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactionRuleType {
    Strategic,
    Tactical,
    Passive,
}

/// Faction-wide rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionRule {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub rule_type: FactionRuleType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityType {
    Action,
    Passive,
    Unique,
}

/// Operative ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ability_type: AbilityType,
    /// Action point cost such as "1AP"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<String>,
}

/// Selection limits from the composition rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLimits {
    /// Exact number of leader operatives required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_leader_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unique_operatives: Option<u32>,
    /// Comma-separated keyword fragments that may be taken more than once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl SelectionLimits {
    /// Lowercased, trimmed exemption fragments. Empty fragments are dropped.
    pub fn exemptions(&self) -> Vec<String> {
        self.exception
            .as_deref()
            .map(|text| {
                text.split(',')
                    .map(|part| part.trim().to_lowercase())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_operatives: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_limits: Option<SelectionLimits>,
}

/// Roster-building restrictions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRestrictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_operatives: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_operatives: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fire_team_rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<CompositionRules>,
}

impl TeamRestrictions {
    pub fn selection_limits(&self) -> Option<&SelectionLimits> {
        self.composition
            .as_ref()
            .and_then(|c| c.selection_limits.as_ref())
    }

    pub fn leader_count(&self) -> Option<u32> {
        self.selection_limits().and_then(|l| l.leader_count)
    }

    pub fn exemptions(&self) -> Vec<String> {
        self.selection_limits()
            .map(SelectionLimits::exemptions)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionMetadata {
    pub version: String,
    pub source: String,
    /// ISO date
    pub last_updated: String,
}

/// A faction with everything needed to build and play a team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub faction_keywords: Vec<String>,
    pub rules: Vec<FactionRule>,
    #[serde(default)]
    pub global_rules: IndexMap<String, String>,
    pub operatives: Vec<Operative>,
    pub weapons: Vec<Weapon>,
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    pub restrictions: TeamRestrictions,
    pub metadata: FactionMetadata,
}

impl Faction {
    /// Look up an operative datacard by id
    pub fn operative(&self, id: &str) -> Option<&Operative> {
        self.operatives.iter().find(|op| op.id == id)
    }

    /// Look up a weapon by id, falling back to a case-insensitive name match
    pub fn weapon(&self, id_or_name: &str) -> Option<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.id == id_or_name)
            .or_else(|| {
                self.weapons
                    .iter()
                    .find(|w| w.name.eq_ignore_ascii_case(id_or_name))
            })
    }

    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }
}
