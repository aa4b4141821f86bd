//! Versioned state snapshots on top of a [`KeyValueStore`]
//!
//! Every saved value is wrapped as `{"schema", "version", "data"}`. Loads
//! never fail: anything unreadable is logged and treated as absent so the
//! caller starts from a fresh state.

use crate::core::config::GameDefaults;
use crate::core::error::RosterError;
use crate::storage::store::{KeyValueStore, GAME_MODE_KEY, TEAM_STATE_KEY};
use crate::team::state::{GameModeState, TeamState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const TEAM_STATE_SCHEMA: &str = "team-state";
pub const GAME_MODE_SCHEMA: &str = "game-mode";

/// Newest snapshot version this build reads and writes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub schema: String,
    pub version: u32,
    pub data: T,
}

impl<T> Snapshot<T> {
    pub fn new(schema: &str, data: T) -> Self {
        Self {
            schema: schema.to_string(),
            version: SNAPSHOT_VERSION,
            data,
        }
    }
}

fn is_envelope(value: &serde_json::Value) -> bool {
    value.get("schema").is_some() && value.get("version").is_some() && value.get("data").is_some()
}

/// Decode a stored string, accepting the tagged envelope or a bare legacy
/// payload of the state itself
pub fn decode_snapshot<T: DeserializeOwned>(raw: &str, schema: &str) -> Option<T> {
    decode(raw, schema, schema)
}

fn decode<T: DeserializeOwned>(raw: &str, key: &str, schema: &str) -> Option<T> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Discarding {}: not valid JSON ({})", key, e);
            return None;
        }
    };

    if !is_envelope(&value) {
        return match serde_json::from_value::<T>(value) {
            Ok(data) => {
                tracing::info!("Migrated untagged {} payload to {} v{}", key, schema, SNAPSHOT_VERSION);
                Some(data)
            }
            Err(e) => {
                tracing::warn!("Discarding {}: unrecognized payload ({})", key, e);
                None
            }
        };
    }

    let snapshot: Snapshot<T> = match serde_json::from_value(value) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Discarding {}: malformed snapshot ({})", key, e);
            return None;
        }
    };

    if snapshot.schema != schema {
        tracing::warn!(
            "Discarding {}: schema {} where {} was expected",
            key,
            snapshot.schema,
            schema
        );
        return None;
    }
    if snapshot.version > SNAPSHOT_VERSION {
        tracing::warn!(
            "Discarding {}: version {} is newer than supported {}",
            key,
            snapshot.version,
            SNAPSHOT_VERSION
        );
        return None;
    }

    Some(snapshot.data)
}

fn load<S, T>(store: &S, key: &str, schema: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key) {
        Ok(Some(raw)) => decode(&raw, key, schema),
        Ok(None) => {
            tracing::debug!("Nothing stored under {}", key);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}

fn save<S, T>(store: &mut S, key: &str, schema: &str, data: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let snapshot = Snapshot::new(schema, data);
    let result = serde_json::to_string(&snapshot)
        .map_err(RosterError::from)
        .and_then(|json| store.set(key, &json));
    match result {
        Ok(()) => tracing::debug!("Saved {} snapshot under {}", schema, key),
        Err(e) => tracing::error!("Failed to save {}: {}", key, e),
    }
}

fn clear<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::error!("Failed to clear {}: {}", key, e);
    }
}

pub fn save_team_state<S: KeyValueStore + ?Sized>(store: &mut S, state: &TeamState) {
    save(store, TEAM_STATE_KEY, TEAM_STATE_SCHEMA, state);
}

pub fn load_team_state<S: KeyValueStore + ?Sized>(store: &S) -> Option<TeamState> {
    load(store, TEAM_STATE_KEY, TEAM_STATE_SCHEMA)
}

pub fn clear_team_state<S: KeyValueStore + ?Sized>(store: &mut S) {
    clear(store, TEAM_STATE_KEY);
}

pub fn save_game_mode_state<S: KeyValueStore + ?Sized>(store: &mut S, state: &GameModeState) {
    save(store, GAME_MODE_KEY, GAME_MODE_SCHEMA, state);
}

/// Stored game mode state, with initial tracking installed if it had none
pub fn load_game_mode_state<S: KeyValueStore + ?Sized>(
    store: &S,
    defaults: &GameDefaults,
) -> Option<GameModeState> {
    let mut state: GameModeState = load(store, GAME_MODE_KEY, GAME_MODE_SCHEMA)?;
    state.ensure_tracking(defaults);
    Some(state)
}

pub fn clear_game_mode_state<S: KeyValueStore + ?Sized>(store: &mut S) {
    clear(store, GAME_MODE_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TeamSide;
    use crate::data::operative::Operative;
    use crate::storage::store::MemoryStore;

    fn team() -> TeamState {
        let mut team = TeamState::initial();
        team.select_faction("plague-marines");
        team.add_operative(
            Operative {
                id: "champion".into(),
                name: "Plague Marine Champion".into(),
                operative_type: "Leader".into(),
                ..Default::default()
            },
            vec!["Boltgun".into()],
        );
        team
    }

    #[test]
    fn test_team_state_survives_save_and_load() {
        let mut store = MemoryStore::new();
        let state = team();
        save_team_state(&mut store, &state);
        assert_eq!(load_team_state(&store), Some(state));

        let raw = store.get(TEAM_STATE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schema"], TEAM_STATE_SCHEMA);
        assert_eq!(value["version"], SNAPSHOT_VERSION);
    }

    #[test]
    fn test_missing_and_corrupt_values_load_as_none() {
        let mut store = MemoryStore::new();
        assert_eq!(load_team_state(&store), None);

        store.set(TEAM_STATE_KEY, "{not json").unwrap();
        assert_eq!(load_team_state(&store), None);
    }

    #[test]
    fn test_wrong_schema_rejected() {
        let mut store = MemoryStore::new();
        save_game_mode_state(&mut store, &GameModeState::initial());
        let raw = store.get(GAME_MODE_KEY).unwrap().unwrap();
        store.set(TEAM_STATE_KEY, &raw).unwrap();
        assert_eq!(load_team_state(&store), None);
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut store = MemoryStore::new();
        let mut snapshot = Snapshot::new(TEAM_STATE_SCHEMA, team());
        snapshot.version = SNAPSHOT_VERSION + 1;
        store
            .set(TEAM_STATE_KEY, &serde_json::to_string(&snapshot).unwrap())
            .unwrap();
        assert_eq!(load_team_state(&store), None);
    }

    #[test]
    fn test_bare_legacy_payload_accepted() {
        let mut store = MemoryStore::new();
        store
            .set(
                TEAM_STATE_KEY,
                r#"{"factionId": "angels-of-death", "selectedOperatives": []}"#,
            )
            .unwrap();
        let state = load_team_state(&store).unwrap();
        assert_eq!(state.faction_id.as_deref(), Some("angels-of-death"));
        assert!(state.rule_choices.is_none());
    }

    #[test]
    fn test_game_mode_load_installs_tracking() {
        let mut store = MemoryStore::new();
        let mut state = GameModeState::initial();
        state.team_mut(TeamSide::Alpha).select_faction("angels-of-death");
        save_game_mode_state(&mut store, &state);

        let loaded = load_game_mode_state(&store, &GameDefaults::default()).unwrap();
        let tracking = loaded.game_tracking.as_ref().unwrap();
        assert_eq!(tracking.turning_point, 1);
        assert_eq!(loaded.alpha.faction_id.as_deref(), Some("angels-of-death"));
    }

    #[test]
    fn test_decode_snapshot_from_file_contents() {
        let raw = serde_json::to_string(&Snapshot::new(TEAM_STATE_SCHEMA, team())).unwrap();
        let state: TeamState = decode_snapshot(&raw, TEAM_STATE_SCHEMA).unwrap();
        assert_eq!(state.len(), 1);
        assert!(decode_snapshot::<TeamState>(&raw, GAME_MODE_SCHEMA).is_none());
    }

    #[test]
    fn test_clear_removes_value() {
        let mut store = MemoryStore::new();
        save_team_state(&mut store, &team());
        save_game_mode_state(&mut store, &GameModeState::initial());
        clear_team_state(&mut store);
        assert_eq!(load_team_state(&store), None);
        assert!(load_game_mode_state(&store, &GameDefaults::default()).is_some());
        clear_game_mode_state(&mut store);
        assert!(store.is_empty());
    }
}
