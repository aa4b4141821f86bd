//! Team composition rules
//!
//! Batch validation of a whole roster and an incremental pre-check for
//! adding one operative. Both read the same faction restrictions so they
//! agree on capacity, leader count and duplicates.

use crate::data::faction::Faction;
use crate::data::operative::Operative;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of validating a whole roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamValidation {
    pub valid: bool,
    /// Every violated rule, in check order
    pub errors: Vec<String>,
}

/// Why an operative cannot be added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddRejection {
    AtCapacity { max: u32 },
    LeaderLimit { limit: u32 },
    Duplicate { name: String },
}

impl fmt::Display for AddRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddRejection::AtCapacity { max } => {
                write!(f, "Team is at maximum capacity ({} operatives)", max)
            }
            AddRejection::LeaderLimit { limit } => write!(
                f,
                "Team already has the maximum of {} leader operative{}",
                limit,
                plural(*limit)
            ),
            AddRejection::Duplicate { name } => write!(f, "{} is already in the team", name),
        }
    }
}

/// Outcome of the add pre-check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCheck {
    pub can_add: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<AddRejection>,
}

impl AddCheck {
    fn allowed() -> Self {
        Self {
            can_add: true,
            reason: None,
        }
    }

    fn rejected(reason: AddRejection) -> Self {
        tracing::debug!("Add rejected: {}", reason);
        Self {
            can_add: false,
            reason: Some(reason),
        }
    }

    /// Display text for the rejection, if any
    pub fn reason_text(&self) -> Option<String> {
        self.reason.as_ref().map(ToString::to_string)
    }
}

fn plural(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Validate a roster against the faction's restrictions.
///
/// Never short-circuits: every violated rule contributes an error.
pub fn validate_team_composition<'a, I>(faction: &Faction, selected: I) -> TeamValidation
where
    I: IntoIterator<Item = &'a Operative>,
{
    let selected: Vec<&Operative> = selected.into_iter().collect();
    let restrictions = &faction.restrictions;
    let mut errors = Vec::new();

    if let Some(max) = restrictions.max_operatives {
        if selected.len() > max as usize {
            errors.push(format!("Too many operatives. Maximum is {}", max));
        }
    }

    if let Some(min) = restrictions.min_operatives {
        if selected.len() < min as usize {
            errors.push(format!("Not enough operatives. Minimum is {}", min));
        }
    }

    if let Some(required) = restrictions.leader_count() {
        let leaders = selected.iter().filter(|op| op.is_leader()).count();
        if leaders != required as usize {
            errors.push(format!(
                "Team must have exactly {} leader operative{}",
                required,
                plural(required)
            ));
        }
    }

    // Group by id, first appearance order
    let mut by_id: IndexMap<&str, (usize, &Operative)> = IndexMap::new();
    for &op in &selected {
        by_id.entry(op.id.as_str()).or_insert((0, op)).0 += 1;
    }

    let exemptions = restrictions.exemptions();
    for (count, representative) in by_id.values() {
        if *count > 1 && !representative.is_exempt(&exemptions) {
            errors.push(format!("Cannot have multiple {}", representative.name));
        }
    }

    if !errors.is_empty() {
        tracing::debug!(
            "Team of {} for {} failed validation: {:?}",
            selected.len(),
            faction.id,
            errors
        );
    }

    TeamValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Check whether `candidate` can join `current` without breaking a rule.
///
/// Checks capacity, then leader count, then duplicates; the first failure
/// wins.
pub fn can_add_operative<'a, I>(faction: &Faction, current: I, candidate: &Operative) -> AddCheck
where
    I: IntoIterator<Item = &'a Operative>,
{
    let current: Vec<&Operative> = current.into_iter().collect();
    let restrictions = &faction.restrictions;

    if let Some(max) = restrictions.max_operatives {
        if current.len() >= max as usize {
            return AddCheck::rejected(AddRejection::AtCapacity { max });
        }
    }

    if candidate.is_leader() {
        if let Some(limit) = restrictions.leader_count() {
            let leaders = current.iter().filter(|op| op.is_leader()).count();
            if leaders >= limit as usize {
                return AddCheck::rejected(AddRejection::LeaderLimit { limit });
            }
        }
    }

    let already_present = current.iter().any(|op| op.id == candidate.id);
    if already_present && !candidate.is_exempt(&restrictions.exemptions()) {
        return AddCheck::rejected(AddRejection::Duplicate {
            name: candidate.name.clone(),
        });
    }

    AddCheck::allowed()
}

/// Sum of operative costs; missing costs count as zero
pub fn calculate_team_cost<'a, I>(operatives: I) -> u32
where
    I: IntoIterator<Item = &'a Operative>,
{
    operatives.into_iter().map(|op| op.cost).sum()
}
