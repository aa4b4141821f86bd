//! Operative datacards and their weapon configuration
//!
//! Faction files describe an operative's weapons in one of three shapes:
//! a flat `weapons` list, a `fixed_loadout` list, or a `weapon_options`
//! block with choices. The shape is decided once, at deserialization, and
//! carried as a [`WeaponConfig`] so nothing downstream re-sniffs the JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Keys inside `weapon_options` that are structure, not weapon slots
pub const RESERVED_OPTION_KEYS: [&str; 5] = [
    "standard_loadout_groups",
    "alternative_loadouts",
    "fixed_secondary",
    "ammo_profiles",
    "firing_profiles",
];

/// Datacard characteristics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperativeStats {
    /// Movement in inches
    pub movement: u32,
    pub action_point_limit: u32,
    pub group_activation: u32,
    /// Defence dice
    pub defense: u32,
    /// Save target (3 means 3+)
    pub save: u32,
    pub wounds: u32,
}

/// Value stored under a slot key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// A single always-equipped weapon
    Single(String),
    /// Alternatives, one of which must be picked
    Choice(Vec<String>),
    /// Anything else; ignored by the resolver
    Other(serde_json::Value),
}

/// A complete replacement weapon set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeLoadout {
    pub fixed: Vec<String>,
}

/// Structured weapon choices for operatives with options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub standard_loadout_groups: Vec<IndexMap<String, SlotValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_loadouts: Option<Vec<AlternativeLoadout>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_secondary: Option<String>,

    /// Ammunition variants; metadata only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo_profiles: Option<serde_json::Value>,

    /// Firing mode variants; metadata only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firing_profiles: Option<serde_json::Value>,

    /// Top-level slot keys such as `slot_1_rifle`, in document order
    #[serde(flatten)]
    pub direct_slots: IndexMap<String, SlotValue>,
}

/// How an operative's weapons are specified
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WeaponConfig {
    /// Old-style flat list of weapon names
    Legacy(Vec<String>),
    /// Fixed weapons with no choice
    Fixed(Vec<String>),
    /// Slots, fixed weapons and alternatives
    Structured(WeaponOptions),
    /// Nothing specified
    #[default]
    Unarmed,
}

impl WeaponConfig {
    /// Pick the configuration from the raw wire fields.
    ///
    /// A non-empty `weapons` list wins, then a non-empty `fixed_loadout`,
    /// then any `weapon_options` block.
    pub fn from_wire(
        weapons: Option<Vec<String>>,
        fixed_loadout: Option<Vec<String>>,
        weapon_options: Option<WeaponOptions>,
    ) -> Self {
        match (weapons, fixed_loadout, weapon_options) {
            (Some(w), _, _) if !w.is_empty() => WeaponConfig::Legacy(w),
            (_, Some(f), _) if !f.is_empty() => WeaponConfig::Fixed(f),
            (_, _, Some(options)) => WeaponConfig::Structured(options),
            _ => WeaponConfig::Unarmed,
        }
    }
}

/// A single operative datacard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "OperativeWire", into = "OperativeWire")]
pub struct Operative {
    pub id: String,
    pub name: String,
    /// Role label, e.g. "Leader", "Heavy Gunner"
    pub operative_type: String,
    pub stats: OperativeStats,
    pub weapon_config: WeaponConfig,
    /// Ability ids
    pub abilities: Vec<String>,
    pub keywords: Vec<String>,
    pub cost: u32,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl Operative {
    /// Whether the role label marks this operative as a leader
    pub fn is_leader(&self) -> bool {
        self.operative_type.to_lowercase().contains("leader")
    }

    /// Whether any keyword contains one of the (lowercase) exemption fragments
    pub fn is_exempt(&self, exemptions: &[String]) -> bool {
        if exemptions.is_empty() {
            return false;
        }
        self.keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            exemptions.iter().any(|fragment| keyword.contains(fragment.as_str()))
        })
    }

    /// Exact keyword match
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}

/// Operative as it appears in faction JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OperativeWire {
    id: String,
    name: String,
    #[serde(rename = "type")]
    operative_type: String,
    stats: OperativeStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weapons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fixed_loadout: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weapon_options: Option<WeaponOptions>,
    #[serde(default)]
    abilities: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<OperativeWire> for Operative {
    fn from(wire: OperativeWire) -> Self {
        Self {
            weapon_config: WeaponConfig::from_wire(
                wire.weapons,
                wire.fixed_loadout,
                wire.weapon_options,
            ),
            id: wire.id,
            name: wire.name,
            operative_type: wire.operative_type,
            stats: wire.stats,
            abilities: wire.abilities,
            keywords: wire.keywords,
            cost: wire.cost.unwrap_or(0),
            image: wire.image,
            description: wire.description,
        }
    }
}

impl From<Operative> for OperativeWire {
    fn from(op: Operative) -> Self {
        let (weapons, fixed_loadout, weapon_options) = match op.weapon_config {
            WeaponConfig::Legacy(w) => (Some(w), None, None),
            WeaponConfig::Fixed(f) => (None, Some(f), None),
            WeaponConfig::Structured(o) => (None, None, Some(o)),
            WeaponConfig::Unarmed => (None, None, None),
        };
        Self {
            id: op.id,
            name: op.name,
            operative_type: op.operative_type,
            stats: op.stats,
            weapons,
            fixed_loadout,
            weapon_options,
            abilities: op.abilities,
            keywords: op.keywords,
            cost: Some(op.cost),
            image: op.image,
            description: op.description,
        }
    }
}
