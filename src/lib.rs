//! kt-roster - Kill Team roster builder and game tracker
//!
//! Faction data is loaded from JSON under `data/`. The `team` module holds
//! the composition rules and weapon loadout resolution; `game` tracks the
//! counters of a game in progress; `storage` persists both between runs.

pub mod core;
pub mod data;
pub mod game;
pub mod rules;
pub mod storage;
pub mod team;
