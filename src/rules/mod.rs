//! Rules reference: weapon rule glossary and core game rules

pub mod core_rules;
pub mod glossary;

pub use core_rules::{
    extract_action_name, extract_ap_cost, Rule, RuleCategory, RulesReference, ACTIONS_CATEGORY,
};
pub use glossary::{GlossaryEntry, RuleExpansion, RuleGlossary};
