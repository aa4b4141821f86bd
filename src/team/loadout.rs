//! Weapon loadout resolution
//!
//! Turns an operative's [`WeaponConfig`] into a uniform [`WeaponLoadout`]:
//! weapons that are always carried, slots that need exactly one pick, and
//! optional complete alternative sets.

use crate::data::operative::{
    AlternativeLoadout, Operative, SlotValue, WeaponConfig, WeaponOptions, RESERVED_OPTION_KEYS,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A choice point requiring exactly one weapon from `options`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponSlot {
    pub slot_id: String,
    pub label: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_selection: Option<String>,
}

impl WeaponSlot {
    fn new(slot_id: &str, options: Vec<String>) -> Self {
        Self {
            slot_id: slot_id.to_string(),
            label: format_slot_label(slot_id),
            default_selection: options.first().cloned(),
            options,
        }
    }

    /// How many of this slot's options appear in `selected`
    pub fn picks_in(&self, selected: &[String]) -> usize {
        selected.iter().filter(|w| self.options.contains(w)).count()
    }
}

/// Normalized weapon configuration for one operative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponLoadout {
    pub slots: Vec<WeaponSlot>,
    pub fixed_weapons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_loadouts: Option<Vec<AlternativeLoadout>>,
}

impl WeaponLoadout {
    fn fixed(weapons: &[String]) -> Self {
        Self {
            fixed_weapons: weapons.to_vec(),
            ..Default::default()
        }
    }

    /// Nothing to equip at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.fixed_weapons.is_empty()
    }

    /// Whether there is anything for a user to choose
    pub fn has_choices(&self) -> bool {
        !self.slots.is_empty()
            || self
                .alternative_loadouts
                .as_ref()
                .is_some_and(|alts| !alts.is_empty())
    }

    /// Fixed weapons followed by each slot's default pick
    pub fn default_selection(&self) -> Vec<String> {
        self.fixed_weapons
            .iter()
            .cloned()
            .chain(self.slots.iter().filter_map(|s| s.default_selection.clone()))
            .collect()
    }

    /// Every fixed weapon present and exactly one pick per slot.
    ///
    /// Extra weapons in `selected` are tolerated.
    pub fn accepts(&self, selected: &[String]) -> bool {
        if self.is_empty() {
            return selected.is_empty();
        }

        if let Some(missing) = self.fixed_weapons.iter().find(|w| !selected.contains(w)) {
            tracing::debug!("Selection missing fixed weapon {}", missing);
            return false;
        }

        self.slots.iter().all(|slot| {
            let picks = slot.picks_in(selected);
            if picks != 1 {
                tracing::debug!("Slot {} has {} picks, expected 1", slot.slot_id, picks);
            }
            picks == 1
        })
    }

    /// A standard loadout or one of the complete alternative sets
    pub fn allows(&self, selected: &[String]) -> bool {
        self.accepts(selected) || self.matching_alternative(selected).is_some()
    }

    /// Fixed weapons plus the chosen alternative set
    pub fn alternative_selection(&self, index: usize) -> Option<Vec<String>> {
        let alternative = self.alternative_loadouts.as_ref()?.get(index)?;
        Some(
            self.fixed_weapons
                .iter()
                .chain(alternative.fixed.iter())
                .cloned()
                .collect(),
        )
    }

    /// Index of the alternative set `selected` corresponds to, if any
    pub fn matching_alternative(&self, selected: &[String]) -> Option<usize> {
        let count = self.alternative_loadouts.as_ref()?.len();
        (0..count).find(|&index| {
            self.alternative_selection(index).is_some_and(|weapons| {
                weapons.len() == selected.len() && selected.iter().all(|w| weapons.contains(w))
            })
        })
    }

    /// Replace whatever `selected` holds for a slot with `weapon`.
    ///
    /// Returns `None` for an unknown slot or a weapon the slot does not offer.
    pub fn select_in_slot(
        &self,
        selected: &[String],
        slot_id: &str,
        weapon: &str,
    ) -> Option<Vec<String>> {
        let slot = self.slots.iter().find(|s| s.slot_id == slot_id)?;
        if !slot.options.iter().any(|o| o == weapon) {
            return None;
        }
        let mut next: Vec<String> = selected
            .iter()
            .filter(|w| !slot.options.contains(w))
            .cloned()
            .collect();
        next.push(weapon.to_string());
        Some(next)
    }
}

/// Resolve an operative's weapon configuration
pub fn resolve_weapon_loadout(operative: &Operative) -> WeaponLoadout {
    match &operative.weapon_config {
        WeaponConfig::Legacy(weapons) | WeaponConfig::Fixed(weapons) => {
            WeaponLoadout::fixed(weapons)
        }
        WeaponConfig::Structured(options) => resolve_options(options),
        WeaponConfig::Unarmed => WeaponLoadout::default(),
    }
}

fn resolve_options(options: &WeaponOptions) -> WeaponLoadout {
    let mut loadout = WeaponLoadout::default();

    // Grouped slots: any non-empty list is a slot, a string is fixed
    for group in &options.standard_loadout_groups {
        for (key, value) in group {
            match value {
                SlotValue::Choice(choices) if !choices.is_empty() => {
                    loadout.slots.push(WeaponSlot::new(key, choices.clone()));
                }
                SlotValue::Single(weapon) => loadout.fixed_weapons.push(weapon.clone()),
                _ => {}
            }
        }
    }

    // Top-level slots: a one-element list is a fixed weapon in disguise
    for (key, value) in &options.direct_slots {
        if RESERVED_OPTION_KEYS.contains(&key.as_str()) {
            continue;
        }
        match value {
            SlotValue::Choice(choices) if choices.len() == 1 => {
                loadout.fixed_weapons.push(choices[0].clone());
            }
            SlotValue::Choice(choices) if choices.len() > 1 => {
                loadout.slots.push(WeaponSlot::new(key, choices.clone()));
            }
            SlotValue::Single(weapon) => loadout.fixed_weapons.push(weapon.clone()),
            _ => {}
        }
    }

    if let Some(secondary) = &options.fixed_secondary {
        loadout.fixed_weapons.push(secondary.clone());
    }

    loadout.alternative_loadouts = options.alternative_loadouts.clone();

    loadout
}

fn slot_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(r"^slot_\d+_").expect("slot prefix pattern is valid"))
}

/// Human-readable label for a slot key.
///
/// `slot_1_pistol` becomes "Pistol", `slot_3_power_weapon` becomes
/// "Power Weapon".
pub fn format_slot_label(slot_key: &str) -> String {
    let stripped = slot_prefix().replace(slot_key, "");

    let special = match &*stripped {
        "pistol" => Some("Pistol"),
        "melee" => Some("Melee Weapon"),
        "rifle" => Some("Rifle"),
        "heavy" => Some("Heavy Weapon"),
        "special" => Some("Special Weapon"),
        "ammo_profiles" => Some("Ammunition Type"),
        "firing_profiles" => Some("Firing Mode"),
        _ => None,
    };
    if let Some(label) = special {
        return label.to_string();
    }

    stripped
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fixed weapons plus each slot's first option
pub fn default_weapon_selection(operative: &Operative) -> Vec<String> {
    resolve_weapon_loadout(operative).default_selection()
}

/// Whether `selected` is a legal standard loadout for the operative
pub fn validate_weapon_selection(operative: &Operative, selected: &[String]) -> bool {
    resolve_weapon_loadout(operative).accepts(selected)
}
