//! Injured status and the stat penalties it applies
//!
//! An operative is injured when fewer than half its starting wounds remain.
//! Injured operatives lose 2" of movement and hit one step worse.

use serde::{Deserialize, Serialize};

/// Movement lost while injured, in inches
const INJURED_MOVEMENT_PENALTY: u32 = 2;

/// Worst possible hit target (6+)
const MAX_HIT_STAT: u32 = 6;

/// Manual control over the injured flag.
///
/// `Auto` derives it from wounds; the forced states win unconditionally in
/// either direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjuryOverride {
    #[default]
    Auto,
    ForcedOn,
    ForcedOff,
}

/// Fewer than half of `max_wounds` remaining
pub fn should_be_injured(current_wounds: u32, max_wounds: u32) -> bool {
    // current < max / 2 without losing the half on odd maxima
    u64::from(current_wounds) * 2 < u64::from(max_wounds)
}

/// Resolve the injured flag for an override and wound count
pub fn is_injured(injury: InjuryOverride, current_wounds: u32, max_wounds: u32) -> bool {
    match injury {
        InjuryOverride::Auto => should_be_injured(current_wounds, max_wounds),
        InjuryOverride::ForcedOn => true,
        InjuryOverride::ForcedOff => false,
    }
}

/// Movement after the injury penalty, never below zero
pub fn modified_movement(base_movement: u32, injured: bool) -> u32 {
    if injured {
        base_movement.saturating_sub(INJURED_MOVEMENT_PENALTY)
    } else {
        base_movement
    }
}

/// Hit target after the injury penalty (3+ becomes 4+), capped at 6+
pub fn modified_hit_stat(base_hit: u32, injured: bool) -> u32 {
    if injured {
        base_hit.saturating_add(1).min(MAX_HIT_STAT)
    } else {
        base_hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_half_is_injured() {
        assert!(should_be_injured(8, 18));
        assert!(should_be_injured(9, 20));
        assert!(should_be_injured(1, 10));
    }

    #[test]
    fn test_half_or_more_is_not_injured() {
        assert!(!should_be_injured(9, 18));
        assert!(!should_be_injured(10, 18));
        assert!(!should_be_injured(18, 18));
        assert!(!should_be_injured(5, 10));
    }

    #[test]
    fn test_edge_cases() {
        assert!(should_be_injured(0, 18));
        assert!(!should_be_injured(1, 1));
        assert!(should_be_injured(0, 1));
        assert!(!should_be_injured(0, 0));
    }

    #[test]
    fn test_odd_maxima() {
        assert!(should_be_injured(8, 17));
        assert!(!should_be_injured(9, 17));
        assert!(should_be_injured(5, 11));
        assert!(!should_be_injured(6, 11));
    }

    #[test]
    fn test_overrides_win_both_ways() {
        assert!(is_injured(InjuryOverride::ForcedOn, 18, 18));
        assert!(!is_injured(InjuryOverride::ForcedOff, 1, 18));
        assert!(is_injured(InjuryOverride::Auto, 1, 18));
        assert!(!is_injured(InjuryOverride::Auto, 18, 18));
    }

    #[test]
    fn test_modified_movement() {
        assert_eq!(modified_movement(6, false), 6);
        assert_eq!(modified_movement(6, true), 4);
        assert_eq!(modified_movement(2, true), 0);
        assert_eq!(modified_movement(1, true), 0);
    }

    #[test]
    fn test_modified_hit_stat() {
        assert_eq!(modified_hit_stat(3, false), 3);
        assert_eq!(modified_hit_stat(3, true), 4);
        assert_eq!(modified_hit_stat(5, true), 6);
        assert_eq!(modified_hit_stat(6, true), 6);
        assert_eq!(modified_hit_stat(u32::MAX, true), 6);
    }

    #[test]
    fn test_override_wire_names() {
        let json = serde_json::to_string(&InjuryOverride::ForcedOff).unwrap();
        assert_eq!(json, "\"forced-off\"");
    }
}
