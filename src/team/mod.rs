//! Roster building: composition rules, weapon loadouts and team state

pub mod builder;
pub mod loadout;
pub mod state;

pub use builder::{
    calculate_team_cost, can_add_operative, validate_team_composition, AddCheck, AddRejection,
    TeamValidation,
};
pub use loadout::{
    default_weapon_selection, format_slot_label, resolve_weapon_loadout,
    validate_weapon_selection, WeaponLoadout, WeaponSlot,
};
pub use state::{
    FactionRuleChoices, GameModeState, RuleChoiceRejection, SelectedOperative, TeamState,
    PRIMARY_TACTIC, SECONDARY_TACTIC,
};
