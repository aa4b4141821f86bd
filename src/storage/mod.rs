//! Persistence: key/value stores and versioned state snapshots

pub mod snapshot;
pub mod store;

pub use snapshot::{
    clear_game_mode_state, clear_team_state, decode_snapshot, load_game_mode_state, load_team_state,
    save_game_mode_state, save_team_state, Snapshot, GAME_MODE_SCHEMA, SNAPSHOT_VERSION,
    TEAM_STATE_SCHEMA,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, GAME_MODE_KEY, TEAM_STATE_KEY};
