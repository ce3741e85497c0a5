//! Lineage checks over the rule catalog
//!
//! Release only retires a predecessor for iterations that carry a `ruleId`.
//! A New application for an item pair that already has an Active rule leaves
//! two Active rules side by side; these helpers find such groups.

use std::collections::BTreeMap;

use crate::schemas::Rule;

/// The logical identity of a rule for the at-most-one-Active check
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineageKey {
    pub item1: String,
    pub item2: String,
    pub reward_penalty_level: String,
}

impl LineageKey {
    pub fn of(rule: &Rule) -> Self {
        LineageKey {
            item1: rule.item1.clone(),
            item2: rule.item2.clone(),
            reward_penalty_level: rule.reward_penalty_level.clone(),
        }
    }
}

impl std::fmt::Display for LineageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.item1, self.item2, self.reward_penalty_level)
    }
}

/// Several Active rules sharing one key
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateActive {
    pub key: LineageKey,
    /// Ids of the Active rules, in catalog order
    pub rule_ids: Vec<String>,
}

/// Group Active rules by key and report every group with more than one member
pub fn duplicate_active_lineages(rules: &[Rule]) -> Vec<DuplicateActive> {
    let mut groups: BTreeMap<LineageKey, Vec<String>> = BTreeMap::new();
    for rule in rules.iter().filter(|r| r.is_active()) {
        groups.entry(LineageKey::of(rule)).or_default().push(rule.id.clone());
    }

    groups
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(key, rule_ids)| DuplicateActive { key, rule_ids })
        .collect()
}

/// Ids of Active rules that share `rule`'s key, excluding `rule` itself
pub fn active_siblings<'a>(rules: &'a [Rule], rule: &Rule) -> Vec<&'a str> {
    let key = LineageKey::of(rule);
    rules
        .iter()
        .filter(|r| r.id != rule.id && r.is_active() && LineageKey::of(r) == key)
        .map(|r| r.id.as_str())
        .collect()
}
