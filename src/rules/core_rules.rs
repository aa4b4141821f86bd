//! Core game rules reference, grouped by category

use crate::core::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Category holding the AP-costed actions
pub const ACTIONS_CATEGORY: &str = "Actions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCategory {
    pub category: String,
    pub rules: Vec<Rule>,
}

/// All rule categories from `rules.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesReference {
    categories: Vec<RuleCategory>,
}

impl RulesReference {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn categories(&self) -> &[RuleCategory] {
        &self.categories
    }

    /// Rules of the actions category
    pub fn action_rules(&self) -> &[Rule] {
        self.categories
            .iter()
            .find(|c| c.category == ACTIONS_CATEGORY)
            .map_or(&[], |c| c.rules.as_slice())
    }

    /// Every category except actions
    pub fn general_rules(&self) -> Vec<&RuleCategory> {
        self.categories
            .iter()
            .filter(|c| c.category != ACTIONS_CATEGORY)
            .collect()
    }
}

fn ap_cost_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*\((\d+AP)\)").expect("AP cost pattern is valid"))
}

/// "Reposition (1AP)" gives "1AP"
pub fn extract_ap_cost(rule_name: &str) -> Option<&str> {
    ap_cost_pattern()
        .captures(rule_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// "Reposition (1AP)" gives "Reposition"
pub fn extract_action_name(rule_name: &str) -> String {
    ap_cost_pattern().replace(rule_name, "").into_owned()
}
