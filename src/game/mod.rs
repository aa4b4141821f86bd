//! In-game state: counters per side and injury handling

pub mod injury;
pub mod tracking;

pub use crate::core::types::TeamSide;
pub use injury::{
    is_injured, modified_hit_stat, modified_movement, should_be_injured, InjuryOverride,
};
pub use tracking::{GameTrackingState, OperativeWoundState};
