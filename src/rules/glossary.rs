//! Weapon rule glossary
//!
//! Maps short rule names found on weapon profiles ("Piercing", "Lethal")
//! to their full text. Descriptions use `X` as the placeholder for the
//! rule's parameter.

use crate::core::error::Result;
use crate::data::weapon::RuleValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Glossary entry as stored in `rules-glossary.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub name: String,
    pub description: String,
    /// Where the rule comes from, e.g. "Default Rules" or a faction name
    pub source: String,
}

/// A rule with its parameter substituted in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleExpansion {
    pub name: String,
    pub description: String,
    pub source: String,
}

impl From<&GlossaryEntry> for RuleExpansion {
    fn from(entry: &GlossaryEntry) -> Self {
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
            source: entry.source.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleGlossary {
    entries: IndexMap<String, GlossaryEntry>,
}

impl RuleGlossary {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let glossary = Self::from_json(&content)?;
        tracing::info!("Loaded {} weapon rules from {}", glossary.len(), path.display());
        Ok(glossary)
    }

    /// Full text for a rule, with `X` replaced by `value` when given
    pub fn expand(&self, rule_name: &str, value: Option<&RuleValue>) -> Option<RuleExpansion> {
        let entry = self.entries.get(rule_name)?;
        let mut expansion = RuleExpansion::from(entry);

        if let Some(value) = value {
            let value = value.to_string();
            expansion.description = entry.description.replace('X', &value);
            expansion.name = if rule_name == "Lethal" {
                format!("{} {}+", entry.name, value)
            } else {
                format!("{} {}", entry.name, value)
            };
        }

        Some(expansion)
    }

    /// Every rule, keyed by short name
    pub fn all(&self) -> impl Iterator<Item = (&str, RuleExpansion)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), RuleExpansion::from(entry)))
    }

    /// Case-insensitive match on name or description, in glossary order
    pub fn search(&self, query: &str) -> Vec<RuleExpansion> {
        let query = query.to_lowercase();
        self.entries
            .values()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
            })
            .map(RuleExpansion::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLOSSARY: &str = r#"{
        "Balanced": {"name": "Balanced", "description": "You can re-roll one of your attack dice.", "source": "Default Rules"},
        "Piercing": {"name": "Piercing", "description": "The defender collects X less defence dice.", "source": "Default Rules"},
        "Lethal": {"name": "Lethal", "description": "Your successes equal to or greater than X+ are critical successes.", "source": "Default Rules"},
        "Poison": {"name": "Poison", "description": "Inflicts the poisoned token on the target.", "source": "Plague Marines"}
    }"#;

    fn glossary() -> RuleGlossary {
        RuleGlossary::from_json(GLOSSARY).unwrap()
    }

    #[test]
    fn test_expand_without_value() {
        let rule = glossary().expand("Balanced", None).unwrap();
        assert_eq!(rule.name, "Balanced");
        assert!(rule.description.contains("re-roll"));
        assert_eq!(rule.source, "Default Rules");
    }

    #[test]
    fn test_expand_with_value() {
        let rule = glossary()
            .expand("Piercing", Some(&RuleValue::Number(1)))
            .unwrap();
        assert_eq!(rule.name, "Piercing 1");
        assert_eq!(rule.description, "The defender collects 1 less defence dice.");
    }

    #[test]
    fn test_lethal_gets_plus_suffix() {
        let rule = glossary().expand("Lethal", Some(&RuleValue::Number(5))).unwrap();
        assert_eq!(rule.name, "Lethal 5+");
        assert!(rule.description.contains("5+"));
    }

    #[test]
    fn test_unknown_rule() {
        assert!(glossary().expand("UnknownRule", None).is_none());
    }

    #[test]
    fn test_faction_source_preserved() {
        assert_eq!(glossary().expand("Poison", None).unwrap().source, "Plague Marines");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let g = glossary();
        assert_eq!(g.search("LETHAL").len(), 1);
        assert_eq!(g.search("piercing")[0].name, "Piercing");
        assert_eq!(g.search("defence").len(), 1);
        assert!(g.search("xyzabc123").is_empty());
    }

    #[test]
    fn test_all_keeps_file_order() {
        let g = glossary();
        let keys: Vec<&str> = g.all().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Balanced", "Piercing", "Lethal", "Poison"]);
    }
}
