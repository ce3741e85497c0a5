//! Catalog statistics

use serde::Serialize;

use crate::schemas::Rule;

/// Reward/penalty levels the catalog reports on, in display order
pub const KNOWN_LEVELS: &[&str] = &["地区", "收派岗", "仓管岗", "小件中转", "大件中转", "司机岗"];

/// Rule count per level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCount {
    pub level: &'static str,
    pub count: usize,
}

/// Totals over the whole catalog, whatever the rule status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleStats {
    pub total: usize,
    pub by_level: Vec<LevelCount>,
}

impl RuleStats {
    pub fn of(rules: &[Rule]) -> Self {
        let by_level = KNOWN_LEVELS
            .iter()
            .map(|&level| LevelCount {
                level,
                count: rules.iter().filter(|r| r.reward_penalty_level == level).count(),
            })
            .collect();

        RuleStats {
            total: rules.len(),
            by_level,
        }
    }

    pub fn count(&self, level: &str) -> usize {
        self.by_level
            .iter()
            .find(|c| c.level == level)
            .map_or(0, |c| c.count)
    }
}
