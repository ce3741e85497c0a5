//! Append-only log of released rule versions

use std::collections::BTreeMap;

use crate::schemas::Rule;

/// Every rule version the desk has seen, keyed by (lineage, version, id).
///
/// Entries are never replaced or removed; status changes made after a rule was
/// recorded do not show up here.
#[derive(Debug, Clone, Default)]
pub struct VersionLog {
    entries: BTreeMap<(String, u32, String), Rule>,
}

impl VersionLog {
    pub fn new() -> Self {
        VersionLog::default()
    }

    /// Record every rule in a catalog
    pub fn seeded(rules: &[Rule]) -> Self {
        let mut log = VersionLog::new();
        for rule in rules {
            log.record(rule);
        }
        log
    }

    /// Append a rule version. Returns `false` if this exact rule was already recorded.
    pub fn record(&mut self, rule: &Rule) -> bool {
        let key = (rule.lineage().to_string(), rule.version, rule.id.clone());
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, rule.clone());
        true
    }

    /// All versions of one lineage, oldest first
    pub fn lineage(&self, lineage_id: &str) -> Vec<&Rule> {
        self.entries
            .iter()
            .filter(|((lineage, _, _), _)| lineage == lineage_id)
            .map(|(_, rule)| rule)
            .collect()
    }

    /// Find the lineage a rule id belongs to
    pub fn lineage_of(&self, rule_id: &str) -> Option<&str> {
        self.entries
            .values()
            .find(|rule| rule.id == rule_id)
            .map(|rule| rule.lineage())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
