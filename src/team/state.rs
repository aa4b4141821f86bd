//! Roster state: selected operatives, rule choices and the two-sided game mode

use crate::core::config::GameDefaults;
use crate::core::types::{SelectionId, TeamSide};
use crate::data::operative::Operative;
use crate::game::tracking::GameTrackingState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule choice categories that may not hold the same rule
pub const PRIMARY_TACTIC: &str = "primary";
pub const SECONDARY_TACTIC: &str = "secondary";

/// An operative placed in a roster with its chosen weapons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOperative {
    pub selection_id: SelectionId,
    /// Snapshot taken when the operative was added
    pub operative: Operative,
    pub selected_weapon_ids: Vec<String>,
}

impl SelectedOperative {
    pub fn new(operative: Operative, selected_weapon_ids: Vec<String>) -> Self {
        Self {
            selection_id: SelectionId::generate(&operative.id),
            operative,
            selected_weapon_ids,
        }
    }
}

/// Faction-specific rule picks, e.g. a chapter tactic per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionRuleChoices {
    pub faction_id: String,
    pub choices: IndexMap<String, String>,
}

fn paired_category(category: &str) -> Option<&'static str> {
    match category {
        PRIMARY_TACTIC => Some(SECONDARY_TACTIC),
        SECONDARY_TACTIC => Some(PRIMARY_TACTIC),
        _ => None,
    }
}

/// Why a rule choice was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleChoiceRejection {
    NoFaction,
    TakenByPair { rule_id: String, category: String },
}

impl fmt::Display for RuleChoiceRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleChoiceRejection::NoFaction => write!(f, "Select a faction before choosing rules"),
            RuleChoiceRejection::TakenByPair { rule_id, category } => {
                write!(f, "{} is already the {} choice", rule_id, category)
            }
        }
    }
}

/// One side's roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamState {
    pub faction_id: Option<String>,
    pub selected_operatives: Vec<SelectedOperative>,
    pub rule_choices: Option<FactionRuleChoices>,
}

impl TeamState {
    /// Empty team with no faction
    pub fn initial() -> Self {
        Self::default()
    }

    /// Switch faction. Changing to a different faction drops the roster and
    /// rule choices; re-selecting the current one keeps them.
    pub fn select_faction(&mut self, faction_id: &str) {
        if self.faction_id.as_deref() == Some(faction_id) {
            return;
        }
        if !self.selected_operatives.is_empty() {
            tracing::info!(
                "Switching faction to {}, clearing {} operatives",
                faction_id,
                self.selected_operatives.len()
            );
        }
        self.faction_id = Some(faction_id.to_string());
        self.selected_operatives.clear();
        self.rule_choices = None;
    }

    /// Append an operative with its confirmed weapons
    pub fn add_operative(&mut self, operative: Operative, weapons: Vec<String>) -> SelectionId {
        let selection = SelectedOperative::new(operative, weapons);
        let id = selection.selection_id.clone();
        tracing::debug!("Added {} as {}", selection.operative.name, id);
        self.selected_operatives.push(selection);
        id
    }

    /// Remove one entry. Returns false if no entry had that id.
    pub fn remove_operative(&mut self, selection_id: &SelectionId) -> bool {
        let before = self.selected_operatives.len();
        self.selected_operatives
            .retain(|s| &s.selection_id != selection_id);
        before != self.selected_operatives.len()
    }

    /// Drop every selected operative
    pub fn clear(&mut self) {
        self.selected_operatives.clear();
    }

    /// Record a rule pick for the current faction.
    ///
    /// The primary and secondary tactic can never be the same rule.
    pub fn set_rule_choice(
        &mut self,
        category: &str,
        rule_id: &str,
    ) -> Result<(), RuleChoiceRejection> {
        let Some(faction_id) = self.faction_id.clone() else {
            tracing::warn!("Ignoring rule choice {} with no faction selected", rule_id);
            return Err(RuleChoiceRejection::NoFaction);
        };

        if let Some(pair) = paired_category(category) {
            if self.rule_choice(pair) == Some(rule_id) {
                return Err(RuleChoiceRejection::TakenByPair {
                    rule_id: rule_id.to_string(),
                    category: pair.to_string(),
                });
            }
        }

        let choices = self.rule_choices.get_or_insert_with(|| FactionRuleChoices {
            faction_id,
            choices: IndexMap::new(),
        });
        choices
            .choices
            .insert(category.to_string(), rule_id.to_string());
        Ok(())
    }

    /// Drop the pick for a category. Returns false if nothing was chosen.
    pub fn clear_rule_choice(&mut self, category: &str) -> bool {
        self.rule_choices
            .as_mut()
            .is_some_and(|c| c.choices.shift_remove(category).is_some())
    }

    pub fn rule_choice(&self, category: &str) -> Option<&str> {
        self.rule_choices
            .as_ref()
            .and_then(|c| c.choices.get(category))
            .map(String::as_str)
    }

    pub fn find(&self, selection_id: &SelectionId) -> Option<&SelectedOperative> {
        self.selected_operatives
            .iter()
            .find(|s| &s.selection_id == selection_id)
    }

    /// Operative snapshots, for the composition rules
    pub fn operatives(&self) -> impl Iterator<Item = &Operative> {
        self.selected_operatives.iter().map(|s| &s.operative)
    }

    pub fn len(&self) -> usize {
        self.selected_operatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_operatives.is_empty()
    }
}

/// Both sides of a game plus the shared counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameModeState {
    pub alpha: TeamState,
    pub bravo: TeamState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_tracking: Option<GameTrackingState>,
}

impl GameModeState {
    /// Two empty teams, no tracking yet
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn team(&self, side: TeamSide) -> &TeamState {
        match side {
            TeamSide::Alpha => &self.alpha,
            TeamSide::Bravo => &self.bravo,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamState {
        match side {
            TeamSide::Alpha => &mut self.alpha,
            TeamSide::Bravo => &mut self.bravo,
        }
    }

    /// Tracking state, created with the given defaults when missing
    pub fn ensure_tracking(&mut self, defaults: &GameDefaults) -> &mut GameTrackingState {
        self.game_tracking
            .get_or_insert_with(|| GameTrackingState::initial(defaults))
    }

    /// Remove an operative from a side, dropping its wound tracking too
    pub fn remove_operative(&mut self, side: TeamSide, selection_id: &SelectionId) -> bool {
        let removed = self.team_mut(side).remove_operative(selection_id);
        if removed {
            if let Some(tracking) = self.game_tracking.as_mut() {
                tracking.forget(side, selection_id);
            }
        }
        removed
    }

    /// Clear a side's roster and its wound tracking
    pub fn clear_team(&mut self, side: TeamSide) {
        self.team_mut(side).clear();
        if let Some(tracking) = self.game_tracking.as_mut() {
            tracking.wounds_mut(side).clear();
        }
    }
}
