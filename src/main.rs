//! kt-roster command line
//!
//! Browse faction data, build rosters for the two sides of a game and keep
//! the game counters between invocations.

use clap::{Parser, Subcommand};
use kt_roster::core::config::AppConfig;
use kt_roster::core::error::{Result, RosterError};
use kt_roster::core::types::{SelectionId, TeamSide};
use kt_roster::data::equipment::{
    combine_equipment, filter_equipment_by_keywords, load_universal_equipment, Equipment,
};
use kt_roster::data::faction::Faction;
use kt_roster::data::loader::FactionRegistry;
use kt_roster::data::operative::Operative;
use kt_roster::data::weapon::RuleValue;
use kt_roster::game::injury::{modified_movement, InjuryOverride};
use kt_roster::rules::core_rules::{extract_action_name, extract_ap_cost, RulesReference};
use kt_roster::rules::glossary::RuleGlossary;
use kt_roster::storage::snapshot::{
    decode_snapshot, load_game_mode_state, save_game_mode_state, TEAM_STATE_SCHEMA,
};
use kt_roster::storage::store::FileStore;
use kt_roster::team::builder::{calculate_team_cost, can_add_operative, validate_team_composition};
use kt_roster::team::loadout::{resolve_weapon_loadout, WeaponLoadout};
use kt_roster::team::state::{GameModeState, TeamState};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kt-roster")]
#[command(about = "Team builder and game tracker for Kill Team rosters")]
struct Cli {
    /// Config file (TOML); defaults are used when it does not exist
    #[arg(long, global = true, default_value = "kt-roster.toml")]
    config: PathBuf,

    /// Override the data directory from the config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the storage directory from the config
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available factions
    Factions,

    /// List a faction's operatives with their weapon loadouts
    Operatives { faction: String },

    /// List equipment a faction can take, optionally for one operative
    Equipment {
        faction: String,
        /// Only show items this operative's keywords allow
        #[arg(long)]
        operative: Option<String>,
    },

    /// Validate a team file against a faction's composition rules
    Validate {
        faction: String,
        /// A saved team state, or a JSON array of operative ids
        team: PathBuf,
    },

    /// Add an operative to a side's roster
    Add {
        faction: String,
        operative_id: String,
        /// Weapon to equip; repeat for each weapon. Defaults are used when omitted
        #[arg(long = "weapon")]
        weapons: Vec<String>,
        /// Swap one slot's default pick, e.g. slot_1_pistol="Plasma pistol"
        #[arg(long = "slot", value_name = "SLOT=WEAPON", value_parser = parse_slot_pick, conflicts_with = "weapons")]
        slots: Vec<(String, String)>,
        /// Take an alternative loadout by its listed number
        #[arg(long, conflicts_with_all = ["weapons", "slots"])]
        alternative: Option<usize>,
        #[arg(long, default_value = "alpha")]
        side: TeamSide,
    },

    /// Pick a faction rule for a side, e.g. a primary or secondary tactic.
    /// Leave out the rule to clear the category
    Choose {
        category: String,
        rule_id: Option<String>,
        #[arg(long, default_value = "alpha")]
        side: TeamSide,
    },

    /// Remove an operative from a side's roster
    Remove {
        selection_id: String,
        #[arg(long, default_value = "alpha")]
        side: TeamSide,
    },

    /// Remove every operative from a side's roster
    Clear {
        #[arg(long, default_value = "alpha")]
        side: TeamSide,
    },

    /// Show both rosters and the game counters
    Show,

    /// Adjust game tracking counters
    Track {
        #[command(subcommand)]
        action: TrackAction,
    },

    /// Expand a weapon rule from the glossary
    Rule { name: String, value: Option<String> },

    /// Search the weapon rule glossary
    Search { query: String },

    /// List the core actions and their AP costs
    Actions,
}

#[derive(Subcommand, Debug)]
enum TrackAction {
    /// Move the turning point forward or back
    TurningPoint {
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Gain or spend command points
    Cp {
        side: TeamSide,
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Apply damage (negative) or healing (positive)
    Wounds {
        side: TeamSide,
        selection_id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Set or clear a manual injured flag (auto, forced-on, forced-off)
    Injury {
        side: TeamSide,
        selection_id: String,
        #[arg(value_parser = parse_injury)]
        state: InjuryOverride,
    },

    /// Record which side has initiative
    Initiative { side: TeamSide },
}

fn parse_injury(s: &str) -> std::result::Result<InjuryOverride, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("expected auto, forced-on or forced-off, got '{}'", s))
}

fn parse_slot_pick(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((slot, weapon)) if !slot.is_empty() && !weapon.is_empty() => {
            Ok((slot.to_string(), weapon.to_string()))
        }
        _ => Err(format!("expected SLOT=WEAPON, got '{}'", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kt_roster=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when the command ran but the outcome was a rejection
fn run(cli: Cli) -> Result<bool> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    match cli.command {
        Command::Factions => {
            let registry = FactionRegistry::load_directory(&config.data_dir)?;
            for (id, name) in registry.faction_list() {
                println!("{:<20} {}", id, name);
            }
            Ok(true)
        }
        Command::Operatives { faction } => {
            let registry = FactionRegistry::load_directory(&config.data_dir)?;
            let faction = registry.get_by_str(&faction)?;
            print_operatives(faction);
            Ok(true)
        }
        Command::Equipment { faction, operative } => {
            let registry = FactionRegistry::load_directory(&config.data_dir)?;
            let faction = registry.get_by_str(&faction)?;
            let universal = load_universal_equipment(&config.data_dir)?;
            let all = combine_equipment(&universal, &faction.equipment);
            let usable: Vec<&Equipment> = match operative {
                Some(id) => {
                    let op = faction
                        .operative(&id)
                        .ok_or_else(|| RosterError::OperativeNotFound(id.clone()))?;
                    filter_equipment_by_keywords(&all, &op.keywords)
                }
                None => all.iter().collect(),
            };
            for item in usable {
                let limit = item.usage_limit.as_deref().unwrap_or("");
                println!("{:<24} {:<10} {}", item.name, format!("{:?}", item.category).to_lowercase(), limit);
                println!("    {}", item.description);
            }
            Ok(true)
        }
        Command::Validate { faction, team } => {
            let registry = FactionRegistry::load_directory(&config.data_dir)?;
            let faction = registry.get_by_str(&faction)?;
            let operatives = read_team_file(faction, &team)?;
            Ok(print_validation(faction, &operatives))
        }
        Command::Add {
            faction,
            operative_id,
            weapons,
            slots,
            alternative,
            side,
        } => {
            let registry = FactionRegistry::load_directory(&config.data_dir)?;
            let faction = registry.get_by_str(&faction)?;
            let pick = WeaponPick::from_args(weapons, slots, alternative);
            add_operative(&config, faction, &operative_id, pick, side)
        }
        Command::Choose {
            category,
            rule_id,
            side,
        } => {
            let mut store = FileStore::new(&config.storage_dir);
            let mut state = load_state(&store, &config);
            let team = state.team_mut(side);
            match rule_id {
                Some(rule_id) => {
                    if let Err(reason) = team.set_rule_choice(&category, &rule_id) {
                        println!("Cannot choose {}: {}", rule_id, reason);
                        return Ok(false);
                    }
                    println!("{} {} rule: {}", side, category, rule_id);
                }
                None => {
                    if !team.clear_rule_choice(&category) {
                        println!("No {} rule chosen on {}", category, side);
                        return Ok(false);
                    }
                    println!("Cleared {} rule on {}", category, side);
                }
            }
            save_game_mode_state(&mut store, &state);
            Ok(true)
        }
        Command::Remove { selection_id, side } => {
            let mut store = FileStore::new(&config.storage_dir);
            let mut state = load_state(&store, &config);
            let selection_id = SelectionId::from(selection_id.as_str());
            if !state.remove_operative(side, &selection_id) {
                println!("No operative {} on {}", selection_id, side);
                return Ok(false);
            }
            save_game_mode_state(&mut store, &state);
            println!("Removed {} from {}", selection_id, side);
            Ok(true)
        }
        Command::Clear { side } => {
            let mut store = FileStore::new(&config.storage_dir);
            let mut state = load_state(&store, &config);
            state.clear_team(side);
            save_game_mode_state(&mut store, &state);
            println!("Cleared {}", side);
            Ok(true)
        }
        Command::Show => {
            let registry = FactionRegistry::load_directory(&config.data_dir)?;
            let store = FileStore::new(&config.storage_dir);
            let state = load_state(&store, &config);
            print_game(&registry, &state);
            Ok(true)
        }
        Command::Track { action } => track(&config, action),
        Command::Rule { name, value } => {
            let glossary = RuleGlossary::load(&glossary_path(&config))?;
            let value = value.map(|v| match v.parse::<i64>() {
                Ok(n) => RuleValue::Number(n),
                Err(_) => RuleValue::Text(v),
            });
            match glossary.expand(&name, value.as_ref()) {
                Some(rule) => {
                    println!("{} ({})", rule.name, rule.source);
                    println!("  {}", rule.description);
                    Ok(true)
                }
                None => {
                    println!("No rule named {}", name);
                    Ok(false)
                }
            }
        }
        Command::Search { query } => {
            let glossary = RuleGlossary::load(&glossary_path(&config))?;
            let matches = glossary.search(&query);
            if matches.is_empty() {
                println!("No rules match '{}'", query);
            }
            for rule in matches {
                println!("{:<20} {}", rule.name, rule.description);
            }
            Ok(true)
        }
        Command::Actions => {
            let rules = RulesReference::load(&config.data_dir.join("rules").join("rules.json"))?;
            for rule in rules.action_rules() {
                let cost = extract_ap_cost(&rule.name).unwrap_or("-");
                println!("{:<24} {:>4}  {}", extract_action_name(&rule.name), cost, rule.description);
            }
            Ok(true)
        }
    }
}

fn glossary_path(config: &AppConfig) -> PathBuf {
    config.data_dir.join("weapons").join("rules-glossary.json")
}

fn load_state(store: &FileStore, config: &AppConfig) -> GameModeState {
    load_game_mode_state(store, &config.game).unwrap_or_else(|| {
        let mut state = GameModeState::initial();
        state.ensure_tracking(&config.game);
        state
    })
}

/// Operatives listed in a team file: a saved team state or an id list
fn read_team_file(faction: &Faction, path: &Path) -> Result<Vec<Operative>> {
    let content = std::fs::read_to_string(path)?;

    if let Ok(ids) = serde_json::from_str::<Vec<String>>(&content) {
        return ids
            .iter()
            .map(|id| {
                faction
                    .operative(id)
                    .cloned()
                    .ok_or_else(|| RosterError::OperativeNotFound(id.clone()))
            })
            .collect();
    }

    let team: TeamState = decode_snapshot(&content, TEAM_STATE_SCHEMA).ok_or_else(|| {
        RosterError::Storage(format!("{} is not a team file", path.display()))
    })?;
    if let Some(team_faction) = team.faction_id.as_deref() {
        if team_faction != faction.id {
            tracing::warn!("Team file is for {}, validating against {}", team_faction, faction.id);
        }
    }
    Ok(team.operatives().cloned().collect())
}

fn print_validation(faction: &Faction, operatives: &[Operative]) -> bool {
    let result = validate_team_composition(faction, operatives);
    println!(
        "{} operatives, {} points",
        operatives.len(),
        calculate_team_cost(operatives)
    );
    if result.valid {
        println!("Team is valid");
    } else {
        println!("Team is invalid:");
        for error in &result.errors {
            println!("  - {}", error);
        }
    }
    result.valid
}

/// How the `add` command chooses weapons
enum WeaponPick {
    Defaults,
    Listed(Vec<String>),
    Slots(Vec<(String, String)>),
    /// Alternative number as listed, counting from 1
    Alternative(usize),
}

impl WeaponPick {
    fn from_args(weapons: Vec<String>, slots: Vec<(String, String)>, alternative: Option<usize>) -> Self {
        if let Some(number) = alternative {
            WeaponPick::Alternative(number)
        } else if !weapons.is_empty() {
            WeaponPick::Listed(weapons)
        } else if !slots.is_empty() {
            WeaponPick::Slots(slots)
        } else {
            WeaponPick::Defaults
        }
    }

    /// Weapons to equip, or a message saying why the pick does not fit
    fn resolve(self, loadout: &WeaponLoadout) -> std::result::Result<Vec<String>, String> {
        match self {
            WeaponPick::Defaults => Ok(loadout.default_selection()),
            WeaponPick::Listed(weapons) => Ok(weapons),
            WeaponPick::Slots(picks) => {
                let mut selection = loadout.default_selection();
                for (slot, weapon) in picks {
                    selection = loadout
                        .select_in_slot(&selection, &slot, &weapon)
                        .ok_or_else(|| format!("{} is not an option for {}", weapon, slot))?;
                }
                Ok(selection)
            }
            WeaponPick::Alternative(number) => number
                .checked_sub(1)
                .and_then(|index| loadout.alternative_selection(index))
                .ok_or_else(|| format!("No alternative loadout {}", number)),
        }
    }
}

fn add_operative(
    config: &AppConfig,
    faction: &Faction,
    operative_id: &str,
    pick: WeaponPick,
    side: TeamSide,
) -> Result<bool> {
    let operative = faction
        .operative(operative_id)
        .ok_or_else(|| RosterError::OperativeNotFound(operative_id.to_string()))?;

    let mut store = FileStore::new(&config.storage_dir);
    let mut state = load_state(&store, config);
    let team = state.team_mut(side);
    team.select_faction(&faction.id);

    let check = can_add_operative(faction, team.operatives(), operative);
    if let Some(reason) = check.reason_text() {
        println!("Cannot add {}: {}", operative.name, reason);
        return Ok(false);
    }

    let loadout = resolve_weapon_loadout(operative);
    let using_defaults = matches!(pick, WeaponPick::Defaults);
    let weapons = match pick.resolve(&loadout) {
        Ok(weapons) => weapons,
        Err(message) => {
            println!("{}", message);
            print_loadout(&loadout);
            return Ok(false);
        }
    };
    if !loadout.allows(&weapons) {
        println!("Invalid weapon selection for {}: {}", operative.name, weapons.join(", "));
        print_loadout(&loadout);
        return Ok(false);
    }

    let selection_id = team.add_operative(operative.clone(), weapons.clone());
    let validation = validate_team_composition(faction, team.operatives());
    save_game_mode_state(&mut store, &state);

    println!("Added {} to {} as {}", operative.name, side, selection_id);
    if using_defaults && loadout.has_choices() {
        println!("  default loadout: {}", weapons.join(", "));
    }
    for error in &validation.errors {
        println!("  note: {}", error);
    }
    Ok(true)
}

fn track(config: &AppConfig, action: TrackAction) -> Result<bool> {
    let mut store = FileStore::new(&config.storage_dir);
    let mut state = load_state(&store, config);
    let limits = config.game;

    match action {
        TrackAction::TurningPoint { delta } => {
            let tp = state.ensure_tracking(&limits).adjust_turning_point(delta, &limits);
            println!("Turning point {}", tp);
        }
        TrackAction::Cp { side, delta } => {
            let cp = state
                .ensure_tracking(&limits)
                .adjust_command_points(side, delta, &limits);
            println!("{} has {} CP", side, cp);
        }
        TrackAction::Wounds {
            side,
            selection_id,
            delta,
        } => {
            let id = SelectionId::from(selection_id.as_str());
            let Some(selected) = state.team(side).find(&id).cloned() else {
                println!("No operative {} on {}", id, side);
                return Ok(false);
            };
            let tracking = state.ensure_tracking(&limits);
            let wounds = tracking.adjust_wounds(side, &selected, delta);
            let injured = tracking.injury_status(side, &selected);
            println!(
                "{}: {}/{} wounds{}",
                selected.operative.name,
                wounds,
                selected.operative.stats.wounds,
                if injured { " (injured)" } else { "" }
            );
        }
        TrackAction::Injury {
            side,
            selection_id,
            state: injury,
        } => {
            let id = SelectionId::from(selection_id.as_str());
            let Some(selected) = state.team(side).find(&id).cloned() else {
                println!("No operative {} on {}", id, side);
                return Ok(false);
            };
            let tracking = state.ensure_tracking(&limits);
            tracking.set_injury_override(side, &selected, injury);
            println!(
                "{} injured: {}",
                selected.operative.name,
                tracking.injury_status(side, &selected)
            );
        }
        TrackAction::Initiative { side } => {
            state.ensure_tracking(&limits).set_initiative(side);
            println!("{} has initiative", side);
        }
    }

    save_game_mode_state(&mut store, &state);
    Ok(true)
}

fn print_loadout(loadout: &WeaponLoadout) {
    if loadout.is_empty() {
        println!("    no weapons");
        return;
    }
    if !loadout.fixed_weapons.is_empty() {
        println!("    fixed: {}", loadout.fixed_weapons.join(", "));
    }
    for slot in &loadout.slots {
        let options: Vec<String> = slot
            .options
            .iter()
            .map(|o| {
                if slot.default_selection.as_ref() == Some(o) {
                    format!("{}*", o)
                } else {
                    o.clone()
                }
            })
            .collect();
        println!("    {}: {}", slot.label, options.join(" | "));
    }
    for (i, alt) in loadout.alternative_loadouts.iter().flatten().enumerate() {
        println!("    alternative {}: {}", i + 1, alt.fixed.join(", "));
    }
}

fn print_operatives(faction: &Faction) {
    println!("{}", faction.name);
    for op in &faction.operatives {
        let s = &op.stats;
        println!(
            "  {:<28} {:<16} M{} APL{} DF{} SV{}+ W{}  [{}] {}pts",
            op.name,
            op.operative_type,
            s.movement,
            s.action_point_limit,
            s.defense,
            s.save,
            s.wounds,
            op.id,
            op.cost
        );
        print_loadout(&resolve_weapon_loadout(op));
    }
}

fn print_game(registry: &FactionRegistry, state: &GameModeState) {
    if let Some(tracking) = &state.game_tracking {
        let initiative = tracking
            .initiative
            .map_or("none".to_string(), |side| side.to_string());
        println!(
            "Turning point {}, initiative: {}",
            tracking.turning_point, initiative
        );
    }

    for side in TeamSide::ALL {
        let team = state.team(side);
        let faction = team
            .faction_id
            .as_deref()
            .and_then(|id| registry.get_by_str(id).ok());
        let cp = state
            .game_tracking
            .as_ref()
            .map_or(0, |t| t.command_points(side));

        println!();
        println!(
            "{} - {} ({} CP, {} points)",
            side,
            faction.map_or("no faction", |f| f.name.as_str()),
            cp,
            calculate_team_cost(team.operatives())
        );

        for (category, rule_id) in team.rule_choices.iter().flat_map(|c| &c.choices) {
            println!("  {} rule: {}", category, rule_id);
        }

        for selected in &team.selected_operatives {
            let op = &selected.operative;
            let (wounds, injured) = match &state.game_tracking {
                Some(t) => (
                    t.wounds_for(side, &selected.selection_id, op.stats.wounds),
                    t.injury_status(side, selected),
                ),
                None => (op.stats.wounds, false),
            };
            println!(
                "  {:<28} W{}/{} M{}{}  {}",
                op.name,
                wounds,
                op.stats.wounds,
                modified_movement(op.stats.movement, injured),
                if injured { " injured" } else { "" },
                selected.selection_id
            );
            if !selected.selected_weapon_ids.is_empty() {
                println!("    {}", selected.selected_weapon_ids.join(", "));
            }
        }

        if let Some(faction) = faction {
            let result = validate_team_composition(faction, team.operatives());
            for error in &result.errors {
                println!("  ! {}", error);
            }
        }
    }
}
