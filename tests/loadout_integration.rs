//! Weapon loadouts resolved from the bundled faction data

use kt_roster::data::faction::Faction;
use kt_roster::data::loader::{load_faction, FactionId};
use kt_roster::team::loadout::{
    default_weapon_selection, resolve_weapon_loadout, validate_weapon_selection,
};
use std::path::Path;

fn faction(id: FactionId) -> Option<Faction> {
    let data_dir = Path::new("data");
    if !data_dir.exists() {
        return None;
    }
    Some(load_faction(data_dir, id).unwrap())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_grouped_slots_with_alternative() {
    let Some(faction) = faction(FactionId::AngelsOfDeath) else { return };
    let sergeant = faction.operative("assault-intercessor-sergeant").unwrap();
    let loadout = resolve_weapon_loadout(sergeant);

    assert_eq!(loadout.slots.len(), 2);
    assert_eq!(loadout.slots[0].slot_id, "slot_1_pistol");
    assert_eq!(loadout.slots[0].label, "Pistol");
    assert_eq!(loadout.slots[1].label, "Melee Weapon");
    assert!(loadout.fixed_weapons.is_empty());

    let defaults = default_weapon_selection(sergeant);
    assert_eq!(defaults, strings(&["Heavy bolt pistol", "Chainsword"]));
    assert!(validate_weapon_selection(sergeant, &defaults));

    let alternative = loadout.alternative_selection(0).unwrap();
    assert_eq!(alternative, strings(&["Plasma pistol", "Thunder hammer"]));
    assert_eq!(loadout.matching_alternative(&alternative), Some(0));
    assert_eq!(loadout.matching_alternative(&defaults), None);
}

#[test]
fn test_grouped_single_strings_are_fixed() {
    let Some(faction) = faction(FactionId::AngelsOfDeath) else { return };
    let sniper = faction.operative("eliminator-sniper").unwrap();
    let loadout = resolve_weapon_loadout(sniper);

    assert!(loadout.slots.is_empty());
    assert_eq!(
        loadout.fixed_weapons,
        strings(&["Bolt sniper rifle", "Bolt pistol", "Fists"])
    );
    assert!(!loadout.has_choices());
}

#[test]
fn test_direct_slots_and_fixed_secondary() {
    let Some(faction) = faction(FactionId::AngelsOfDeath) else { return };
    let gunner = faction.operative("intercessor-gunner").unwrap();
    let loadout = resolve_weapon_loadout(gunner);

    assert_eq!(loadout.slots.len(), 1);
    assert_eq!(loadout.slots[0].options.len(), 3);
    assert_eq!(
        loadout.fixed_weapons,
        strings(&["Fists", "Auxiliary grenade launcher"])
    );

    let defaults = default_weapon_selection(gunner);
    assert_eq!(
        defaults,
        strings(&["Fists", "Auxiliary grenade launcher", "Bolt rifle"])
    );

    let swapped = loadout
        .select_in_slot(&defaults, "slot_1_rifle", "Stalker bolt rifle")
        .unwrap();
    assert!(validate_weapon_selection(gunner, &swapped));
    assert!(!swapped.contains(&"Bolt rifle".to_string()));

    let both_rifles = strings(&["Fists", "Auxiliary grenade launcher", "Bolt rifle", "Auto bolt rifle"]);
    assert!(!validate_weapon_selection(gunner, &both_rifles));
}

#[test]
fn test_alternative_with_weapon_outside_slots() {
    let Some(faction) = faction(FactionId::AngelsOfDeath) else { return };
    let gunner = faction.operative("intercessor-gunner").unwrap();
    let loadout = resolve_weapon_loadout(gunner);

    let heavy = loadout.alternative_selection(0).unwrap();
    assert_eq!(
        heavy,
        strings(&["Fists", "Auxiliary grenade launcher", "Heavy bolter"])
    );
    assert!(!validate_weapon_selection(gunner, &heavy));
    assert!(loadout.allows(&heavy));
    assert!(faction.weapon("Heavy bolter").is_some());
}

#[test]
fn test_profile_lists_do_not_become_slots() {
    let Some(faction) = faction(FactionId::AngelsOfDeath) else { return };
    let heavy = faction.operative("heavy-intercessor-gunner").unwrap();
    let loadout = resolve_weapon_loadout(heavy);

    assert!(loadout.slots.is_empty());
    assert_eq!(loadout.fixed_weapons, strings(&["Heavy bolter", "Fists"]));
}

#[test]
fn test_fixed_loadouts() {
    let Some(faction) = faction(FactionId::PlagueMarines) else { return };
    let caster = faction.operative("malignant-plaguecaster").unwrap();
    let loadout = resolve_weapon_loadout(caster);

    assert!(loadout.slots.is_empty());
    assert_eq!(
        loadout.fixed_weapons,
        strings(&["Entropy", "Plague wind", "Corrupted staff"])
    );
    assert!(validate_weapon_selection(caster, &loadout.fixed_weapons));
    assert!(!validate_weapon_selection(caster, &strings(&["Entropy"])));
}

#[test]
fn test_every_loadout_weapon_has_a_profile() {
    for id in FactionId::ALL {
        let Some(faction) = faction(id) else { return };
        for op in &faction.operatives {
            let loadout = resolve_weapon_loadout(op);
            let mut names: Vec<&String> = loadout.fixed_weapons.iter().collect();
            names.extend(loadout.slots.iter().flat_map(|s| s.options.iter()));
            names.extend(
                loadout
                    .alternative_loadouts
                    .iter()
                    .flatten()
                    .flat_map(|alt| alt.fixed.iter()),
            );
            for name in names {
                assert!(
                    faction.weapon(name).is_some(),
                    "{} carries unknown weapon {}",
                    op.id,
                    name
                );
            }
            assert!(
                validate_weapon_selection(op, &default_weapon_selection(op)),
                "default loadout of {} is not valid",
                op.id
            );
        }
    }
}
