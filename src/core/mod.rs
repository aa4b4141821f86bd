pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, GameDefaults};
pub use error::{Result, RosterError};
pub use types::{SelectionId, TeamSide};
