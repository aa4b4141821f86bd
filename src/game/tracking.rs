//! Per-game counters: turning point, initiative, command points and wounds

use crate::core::config::GameDefaults;
use crate::core::types::{SelectionId, TeamSide};
use crate::game::injury::{is_injured, InjuryOverride};
use crate::team::state::SelectedOperative;
use serde::{Deserialize, Serialize};

/// Wounds tracked for one roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperativeWoundState {
    pub selection_id: SelectionId,
    pub current_wounds: u32,
    pub max_wounds: u32,
    #[serde(default)]
    pub injury: InjuryOverride,
}

impl OperativeWoundState {
    fn full(selection_id: SelectionId, max_wounds: u32) -> Self {
        Self {
            selection_id,
            current_wounds: max_wounds,
            max_wounds,
            injury: InjuryOverride::Auto,
        }
    }

    pub fn is_injured(&self) -> bool {
        is_injured(self.injury, self.current_wounds, self.max_wounds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTrackingState {
    pub turning_point: u32,
    pub initiative: Option<TeamSide>,
    pub alpha_command_points: u32,
    pub bravo_command_points: u32,
    pub alpha_operative_wounds: Vec<OperativeWoundState>,
    pub bravo_operative_wounds: Vec<OperativeWoundState>,
}

impl Default for GameTrackingState {
    fn default() -> Self {
        Self::initial(&GameDefaults::default())
    }
}

/// Bounds given in the wrong order are swapped rather than rejected
fn clamp_add(value: u32, delta: i32, min: u32, max: u32) -> u32 {
    let (low, high) = (min.min(max), min.max(max));
    let next = i64::from(value) + i64::from(delta);
    next.clamp(i64::from(low), i64::from(high)) as u32
}

impl GameTrackingState {
    pub fn initial(defaults: &GameDefaults) -> Self {
        Self {
            turning_point: defaults.initial_turning_point,
            initiative: None,
            alpha_command_points: defaults.initial_command_points,
            bravo_command_points: defaults.initial_command_points,
            alpha_operative_wounds: Vec::new(),
            bravo_operative_wounds: Vec::new(),
        }
    }

    /// Step the turning point, clamped to the configured range
    pub fn adjust_turning_point(&mut self, delta: i32, limits: &GameDefaults) -> u32 {
        self.turning_point = clamp_add(
            self.turning_point,
            delta,
            limits.min_turning_point,
            limits.max_turning_point,
        );
        self.turning_point
    }

    pub fn set_initiative(&mut self, side: TeamSide) {
        self.initiative = Some(side);
    }

    pub fn command_points(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Alpha => self.alpha_command_points,
            TeamSide::Bravo => self.bravo_command_points,
        }
    }

    /// Gain or spend command points, clamped to the configured range
    pub fn adjust_command_points(&mut self, side: TeamSide, delta: i32, limits: &GameDefaults) -> u32 {
        let slot = match side {
            TeamSide::Alpha => &mut self.alpha_command_points,
            TeamSide::Bravo => &mut self.bravo_command_points,
        };
        *slot = clamp_add(*slot, delta, limits.min_command_points, limits.max_command_points);
        *slot
    }

    pub fn wounds(&self, side: TeamSide) -> &[OperativeWoundState] {
        match side {
            TeamSide::Alpha => &self.alpha_operative_wounds,
            TeamSide::Bravo => &self.bravo_operative_wounds,
        }
    }

    pub fn wounds_mut(&mut self, side: TeamSide) -> &mut Vec<OperativeWoundState> {
        match side {
            TeamSide::Alpha => &mut self.alpha_operative_wounds,
            TeamSide::Bravo => &mut self.bravo_operative_wounds,
        }
    }

    fn entry_mut(&mut self, side: TeamSide, selected: &SelectedOperative) -> &mut OperativeWoundState {
        let max_wounds = selected.operative.stats.wounds;
        let states = self.wounds_mut(side);
        let index = match states
            .iter()
            .position(|w| w.selection_id == selected.selection_id)
        {
            Some(index) => index,
            None => {
                states.push(OperativeWoundState::full(
                    selected.selection_id.clone(),
                    max_wounds,
                ));
                states.len() - 1
            }
        };
        &mut states[index]
    }

    /// Apply a wound change, clamped to `[0, max]`.
    ///
    /// An operative with no entry yet starts from full wounds.
    pub fn adjust_wounds(&mut self, side: TeamSide, selected: &SelectedOperative, delta: i32) -> u32 {
        let entry = self.entry_mut(side, selected);
        entry.current_wounds = clamp_add(entry.current_wounds, delta, 0, entry.max_wounds);
        tracing::debug!(
            "{} {} wounds now {}/{}",
            side,
            entry.selection_id,
            entry.current_wounds,
            entry.max_wounds
        );
        entry.current_wounds
    }

    /// Tracked wounds, or `max_wounds` when untouched
    pub fn wounds_for(&self, side: TeamSide, selection_id: &SelectionId, max_wounds: u32) -> u32 {
        self.wounds(side)
            .iter()
            .find(|w| &w.selection_id == selection_id)
            .map_or(max_wounds, |w| w.current_wounds)
    }

    pub fn set_injury_override(
        &mut self,
        side: TeamSide,
        selected: &SelectedOperative,
        injury: InjuryOverride,
    ) {
        self.entry_mut(side, selected).injury = injury;
    }

    /// Whether the operative currently counts as injured
    pub fn injury_status(&self, side: TeamSide, selected: &SelectedOperative) -> bool {
        self.wounds(side)
            .iter()
            .find(|w| w.selection_id == selected.selection_id)
            .map_or(false, OperativeWoundState::is_injured)
    }

    /// Drop tracking for a removed roster entry
    pub fn forget(&mut self, side: TeamSide, selection_id: &SelectionId) {
        self.wounds_mut(side)
            .retain(|w| &w.selection_id != selection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::operative::{Operative, OperativeStats};

    fn selected(id: &str, wounds: u32) -> SelectedOperative {
        SelectedOperative {
            selection_id: SelectionId::from(id),
            operative: Operative {
                id: id.into(),
                stats: OperativeStats {
                    wounds,
                    ..Default::default()
                },
                ..Default::default()
            },
            selected_weapon_ids: vec![],
        }
    }

    #[test]
    fn test_initial_tracking() {
        let state = GameTrackingState::initial(&GameDefaults::default());
        assert_eq!(state.turning_point, 1);
        assert_eq!(state.initiative, None);
        assert_eq!(state.command_points(TeamSide::Alpha), 0);
        assert!(state.wounds(TeamSide::Bravo).is_empty());
    }

    #[test]
    fn test_turning_point_clamped() {
        let limits = GameDefaults::default();
        let mut state = GameTrackingState::initial(&limits);
        assert_eq!(state.adjust_turning_point(-1, &limits), 1);
        assert_eq!(state.adjust_turning_point(2, &limits), 3);
        assert_eq!(state.adjust_turning_point(5, &limits), 4);
    }

    #[test]
    fn test_command_points_clamped_per_side() {
        let limits = GameDefaults::default();
        let mut state = GameTrackingState::initial(&limits);
        assert_eq!(state.adjust_command_points(TeamSide::Alpha, -1, &limits), 0);
        assert_eq!(state.adjust_command_points(TeamSide::Alpha, 3, &limits), 3);
        assert_eq!(state.adjust_command_points(TeamSide::Bravo, 50, &limits), 20);
        assert_eq!(state.command_points(TeamSide::Alpha), 3);
    }

    #[test]
    fn test_inverted_limits_do_not_panic() {
        let limits = GameDefaults {
            min_command_points: 10,
            max_command_points: 2,
            ..Default::default()
        };
        let mut state = GameTrackingState::initial(&GameDefaults::default());
        assert_eq!(state.adjust_command_points(TeamSide::Alpha, 50, &limits), 10);
        assert_eq!(state.adjust_command_points(TeamSide::Alpha, -50, &limits), 2);
    }

    #[test]
    fn test_first_wound_change_starts_from_max() {
        let mut state = GameTrackingState::default();
        let op = selected("sel-1", 14);
        assert_eq!(state.wounds_for(TeamSide::Alpha, &op.selection_id, 14), 14);
        assert_eq!(state.adjust_wounds(TeamSide::Alpha, &op, -3), 11);
        assert_eq!(state.adjust_wounds(TeamSide::Alpha, &op, -20), 0);
        assert_eq!(state.adjust_wounds(TeamSide::Alpha, &op, 50), 14);
        assert_eq!(state.wounds(TeamSide::Alpha).len(), 1);
        assert!(state.wounds(TeamSide::Bravo).is_empty());
    }

    #[test]
    fn test_injury_follows_wounds_unless_forced() {
        let mut state = GameTrackingState::default();
        let op = selected("sel-1", 12);
        assert!(!state.injury_status(TeamSide::Bravo, &op));

        state.adjust_wounds(TeamSide::Bravo, &op, -7);
        assert!(state.injury_status(TeamSide::Bravo, &op));

        state.set_injury_override(TeamSide::Bravo, &op, InjuryOverride::ForcedOff);
        assert!(!state.injury_status(TeamSide::Bravo, &op));

        state.set_injury_override(TeamSide::Bravo, &op, InjuryOverride::Auto);
        state.adjust_wounds(TeamSide::Bravo, &op, 7);
        assert!(!state.injury_status(TeamSide::Bravo, &op));
    }

    #[test]
    fn test_forget_removes_entry() {
        let mut state = GameTrackingState::default();
        let op = selected("sel-1", 10);
        state.adjust_wounds(TeamSide::Alpha, &op, -1);
        state.forget(TeamSide::Alpha, &op.selection_id);
        assert_eq!(state.wounds_for(TeamSide::Alpha, &op.selection_id, 10), 10);
    }

    #[test]
    fn test_missing_injury_field_defaults_to_auto() {
        let entry: OperativeWoundState = serde_json::from_str(
            r#"{"selectionId": "sel-1", "currentWounds": 3, "maxWounds": 10}"#,
        )
        .unwrap();
        assert_eq!(entry.injury, InjuryOverride::Auto);
        assert!(entry.is_injured());
    }
}
