//! Property tests for the composition rules

use kt_roster::data::faction::{CompositionRules, Faction, SelectionLimits, TeamRestrictions};
use kt_roster::data::operative::Operative;
use kt_roster::team::builder::{calculate_team_cost, can_add_operative, validate_team_composition};
use proptest::prelude::*;

/// Six datacards: one leader, two warriors (exempt), three specialists
fn roster_pool() -> Vec<Operative> {
    let card = |id: &str, op_type: &str, keyword: &str, cost: u32| Operative {
        id: id.into(),
        name: id.to_uppercase(),
        operative_type: op_type.into(),
        keywords: vec!["TEST".into(), keyword.into()],
        cost,
        ..Default::default()
    };
    vec![
        card("sergeant", "Leader", "LEADER", 25),
        card("warrior", "Warrior", "WARRIOR", 10),
        card("veteran-warrior", "Warrior", "WARRIOR", 12),
        card("gunner", "Gunner", "GUNNER", 18),
        card("medic", "Medic", "MEDIC", 15),
        card("comms", "Comms", "COMMS", 14),
    ]
}

fn test_faction(max: u32) -> Faction {
    Faction {
        id: "test".into(),
        name: "Test".into(),
        operatives: roster_pool(),
        restrictions: TeamRestrictions {
            max_operatives: Some(max),
            composition: Some(CompositionRules {
                total_operatives: Some(max),
                selection_limits: Some(SelectionLimits {
                    leader_count: Some(1),
                    exception: Some("Warrior".into()),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn team_from(indices: &[usize]) -> Vec<Operative> {
    let pool = roster_pool();
    indices.iter().map(|&i| pool[i % pool.len()].clone()).collect()
}

proptest! {
    #[test]
    fn prop_over_capacity_always_invalid(
        max in 1u32..10,
        indices in prop::collection::vec(0usize..6, 0..16),
    ) {
        let faction = test_faction(max);
        let team = team_from(&indices);
        let result = validate_team_composition(&faction, &team);
        let too_many = format!("Too many operatives. Maximum is {}", max);
        prop_assert_eq!(team.len() > max as usize, result.errors.contains(&too_many));
        prop_assert_eq!(result.valid, result.errors.is_empty());
    }

    #[test]
    fn prop_cost_ignores_order(indices in prop::collection::vec(0usize..6, 0..12)) {
        let team = team_from(&indices);
        let mut reversed = team.clone();
        reversed.reverse();
        prop_assert_eq!(calculate_team_cost(&team), calculate_team_cost(&reversed));

        let expected: u32 = team.iter().map(|op| op.cost).sum();
        prop_assert_eq!(calculate_team_cost(&team), expected);
    }

    /// Adding one accepted operative to a valid team that still has room never
    /// introduces a capacity, leader or duplicate error
    #[test]
    fn prop_can_add_agrees_with_validate(
        indices in prop::collection::vec(0usize..6, 0..8),
        candidate in 0usize..6,
    ) {
        let faction = test_faction(6);
        let team = team_from(&indices);
        let before = validate_team_composition(&faction, &team);
        let candidate = roster_pool()[candidate].clone();
        let check = can_add_operative(&faction, &team, &candidate);

        if before.valid && check.can_add {
            let mut after = team.clone();
            after.push(candidate.clone());
            let result = validate_team_composition(&faction, &after);
            prop_assert!(!result.errors.iter().any(|e| e.starts_with("Too many")));
            prop_assert!(!result.errors.iter().any(|e| e.starts_with("Cannot have multiple")));
            prop_assert!(!result.errors.iter().any(|e| e.contains("leader")));
        }
        if team.len() >= 6 {
            prop_assert!(!check.can_add);
        }
    }

    #[test]
    fn prop_exempt_operatives_never_flagged(count in 2usize..6) {
        let faction = test_faction(10);
        let team = team_from(&vec![1; count]);
        let result = validate_team_composition(&faction, &team);
        prop_assert!(!result.errors.iter().any(|e| e.starts_with("Cannot have multiple")));
    }
}
