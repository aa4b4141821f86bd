//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies one roster entry.
///
/// Distinct from the operative id so the same operative can appear in a
/// roster more than once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionId(pub String);

impl SelectionId {
    /// Fresh id for a new selection of `operative_id`
    pub fn generate(operative_id: &str) -> Self {
        Self(format!("{}-{}", operative_id, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SelectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One of the two sides in game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Alpha,
    Bravo,
}

impl TeamSide {
    pub const ALL: [TeamSide; 2] = [TeamSide::Alpha, TeamSide::Bravo];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Alpha => "alpha",
            TeamSide::Bravo => "bravo",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TeamSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" => Ok(TeamSide::Alpha),
            "bravo" => Ok(TeamSide::Bravo),
            other => Err(format!("unknown side '{}', expected alpha or bravo", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_selection_ids_are_unique() {
        let a = SelectionId::generate("intercessor");
        let b = SelectionId::generate("intercessor");
        assert_ne!(a, b);
        assert_ne!(a.as_str(), "intercessor");
        assert!(a.as_str().starts_with("intercessor-"));
    }

    #[test]
    fn test_team_side_parse() {
        assert_eq!("Alpha".parse::<TeamSide>(), Ok(TeamSide::Alpha));
        assert_eq!("bravo".parse::<TeamSide>(), Ok(TeamSide::Bravo));
        assert!("charlie".parse::<TeamSide>().is_err());
    }

    #[test]
    fn test_team_side_wire_name() {
        let json = serde_json::to_string(&TeamSide::Bravo).unwrap();
        assert_eq!(json, "\"bravo\"");
    }
}
