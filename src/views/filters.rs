//! List filters
//!
//! Every predicate is optional and all of them must hold. Unset selections and
//! empty keywords match everything; keywords match case-insensitive substrings.

use crate::domain::is_on_dev_board;
use crate::schemas::{Application, ApplicationStatus, ApplicationType, DevStatus, Rule};

/// Case-insensitive substring match; an empty keyword matches anything
fn contains(haystack: &str, keyword: &str) -> bool {
    keyword.is_empty() || haystack.to_lowercase().contains(&keyword.to_lowercase())
}

/// Like [`contains`], but an absent field only matches an empty keyword
fn contains_opt(haystack: Option<&str>, keyword: &str) -> bool {
    keyword.is_empty() || haystack.is_some_and(|h| contains(h, keyword))
}

fn selected<T: PartialEq>(choice: &Option<T>, value: &T) -> bool {
    choice.as_ref().map_or(true, |c| c == value)
}

fn selected_str(choice: &Option<String>, value: Option<&str>) -> bool {
    choice.as_deref().map_or(true, |c| value == Some(c))
}

/// Filter for the rule catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleFilter {
    pub reward_penalty_level: Option<String>,
    pub dimension: Option<String>,
    /// Keyword on `item2`
    pub item: String,
    /// Keyword on the reward or the penalty standard
    pub standard: String,
    pub creator: String,
}

impl RuleFilter {
    pub fn matches(&self, rule: &Rule) -> bool {
        selected_str(&self.reward_penalty_level, Some(&rule.reward_penalty_level))
            && selected_str(&self.dimension, Some(&rule.dimension))
            && contains(&rule.item2, &self.item)
            && (contains(&rule.reward_std, &self.standard)
                || contains(&rule.penalty_std, &self.standard))
            && contains(&rule.creator, &self.creator)
    }

    pub fn apply<'a>(&self, rules: &'a [Rule]) -> Vec<&'a Rule> {
        rules.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Filter for the application list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationFilter {
    pub reward_penalty_level: Option<String>,
    pub dimension: Option<String>,
    /// Keyword on `item2`
    pub item: String,
    pub application_type: Option<ApplicationType>,
    pub status: Option<ApplicationStatus>,
}

impl ApplicationFilter {
    pub fn matches(&self, app: &Application) -> bool {
        selected_str(&self.reward_penalty_level, app.reward_penalty_level.as_deref())
            && selected_str(&self.dimension, Some(&app.dimension))
            && contains(&app.item2, &self.item)
            && selected(&self.application_type, &app.application_type)
            && selected(&self.status, &app.status)
    }

    pub fn apply<'a>(&self, applications: &'a [Application]) -> Vec<&'a Application> {
        applications.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Filter for the development tracking board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevTrackingFilter {
    pub reward_penalty_level: Option<String>,
    pub application_type: Option<ApplicationType>,
    /// Whether the rule can be sourced automatically
    pub online: Option<bool>,
    /// Unset dev status counts as Pending
    pub dev_status: Option<DevStatus>,
    pub dev_owner: String,
    /// Keyword on `item2` or `desc`
    pub keyword: String,
}

impl DevTrackingFilter {
    pub fn matches(&self, app: &Application) -> bool {
        selected_str(&self.reward_penalty_level, app.reward_penalty_level.as_deref())
            && selected(&self.application_type, &app.application_type)
            && selected(&self.online, &app.is_online_capable())
            && selected(&self.dev_status, &app.effective_dev_status())
            && contains_opt(app.dev_owner.as_deref(), &self.dev_owner)
            && (contains(&app.item2, &self.keyword) || contains(&app.desc, &self.keyword))
    }

    /// Applications on the board that match
    pub fn apply<'a>(&self, applications: &'a [Application]) -> Vec<&'a Application> {
        applications
            .iter()
            .filter(|a| is_on_dev_board(a.status) && self.matches(a))
            .collect()
    }
}

/// Filter for the release queue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingReleaseFilter {
    pub reward_penalty_level: Option<String>,
    pub application_type: Option<ApplicationType>,
    /// Keyword on `item2` or `desc`, or a case-sensitive part of the id
    pub keyword: String,
    pub creator: String,
}

impl PendingReleaseFilter {
    pub fn matches(&self, app: &Application) -> bool {
        let keyword = self.keyword.as_str();
        selected_str(&self.reward_penalty_level, app.reward_penalty_level.as_deref())
            && selected(&self.application_type, &app.application_type)
            && (keyword.is_empty()
                || contains(&app.item2, keyword)
                || contains(&app.desc, keyword)
                || app.id.contains(keyword))
            && contains(&app.creator, &self.creator)
    }

    /// Ready-to-release applications that match
    pub fn apply<'a>(&self, applications: &'a [Application]) -> Vec<&'a Application> {
        applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::ReadyToRelease && self.matches(a))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{sample_application, sample_rule, OnlineSourcing};
    use crate::seed::{BuiltinSeed, SeedProvider};

    fn ids<T: crate::domain::Keyed>(items: Vec<&T>) -> Vec<&str> {
        items.into_iter().map(|i| i.key()).collect()
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        assert!(contains("GPS围栏", "gps"));
        assert!(contains("anything", ""));
        assert!(!contains("", "x"));
        assert!(contains_opt(None, ""));
        assert!(!contains_opt(None, "li"));
        assert!(contains_opt(Some("LiSi"), "lisi"));
    }

    #[test]
    fn test_default_filters_match_everything() {
        let seed = BuiltinSeed.load().unwrap();
        assert_eq!(RuleFilter::default().apply(&seed.rules).len(), 8);
        assert_eq!(ApplicationFilter::default().apply(&seed.applications).len(), 6);
    }

    #[test]
    fn test_rule_filter_conjunction() {
        let seed = BuiltinSeed.load().unwrap();

        let courier = RuleFilter {
            reward_penalty_level: Some("收派岗".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(courier.apply(&seed.rules)), vec!["1", "2", "8"]);

        let attitude = RuleFilter {
            item: "态度".to_string(),
            ..courier.clone()
        };
        assert_eq!(ids(attitude.apply(&seed.rules)), vec!["2"]);

        // The item keyword only looks at item2
        let complaint = RuleFilter {
            item: "投诉".to_string(),
            ..courier
        };
        assert!(complaint.apply(&seed.rules).is_empty());
    }

    #[test]
    fn test_rule_filter_standard_and_creator() {
        let seed = BuiltinSeed.load().unwrap();

        let by_reward = RuleFilter {
            standard: "奖励2000".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(by_reward.apply(&seed.rules)), vec!["5"]);

        let by_penalty = RuleFilter {
            standard: "每次扣罚".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(by_penalty.apply(&seed.rules)), vec!["2", "8"]);

        let by_creator = RuleFilter {
            creator: "李娜".to_string(),
            dimension: Some("服务".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(by_creator.apply(&seed.rules)), vec!["2"]);
    }

    #[test]
    fn test_application_filter() {
        let seed = BuiltinSeed.load().unwrap();

        let iterations = ApplicationFilter {
            application_type: Some(ApplicationType::Iterate),
            ..Default::default()
        };
        assert_eq!(ids(iterations.apply(&seed.applications)), vec!["103", "105", "106"]);

        let pending_courier = ApplicationFilter {
            reward_penalty_level: Some("收派岗".to_string()),
            status: Some(ApplicationStatus::Pending),
            ..Default::default()
        };
        assert_eq!(ids(pending_courier.apply(&seed.applications)), vec!["105"]);

        let missing_level = Application {
            reward_penalty_level: None,
            ..sample_application("x", ApplicationStatus::Draft)
        };
        let by_level = ApplicationFilter {
            reward_penalty_level: Some("司机岗".to_string()),
            ..Default::default()
        };
        assert!(!by_level.matches(&missing_level));
    }

    #[test]
    fn test_dev_tracking_board() {
        let seed = BuiltinSeed.load().unwrap();

        let board = DevTrackingFilter::default().apply(&seed.applications);
        assert_eq!(ids(board), vec!["102", "103", "104"]);

        let pending_dev = DevTrackingFilter {
            dev_status: Some(DevStatus::Pending),
            ..Default::default()
        };
        assert_eq!(ids(pending_dev.apply(&seed.applications)), vec!["102"]);

        let by_owner = DevTrackingFilter {
            dev_owner: "wang".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(by_owner.apply(&seed.applications)), vec!["104"]);

        let by_desc = DevTrackingFilter {
            keyword: "ai监控".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(by_desc.apply(&seed.applications)), vec!["104"]);
    }

    #[test]
    fn test_dev_tracking_online_flag() {
        let online = Application {
            online: OnlineSourcing {
                applied_position: Some("收派员".to_string()),
                applied_product: None,
            },
            ..sample_application("a", ApplicationStatus::InDev)
        };
        let offline = sample_application("b", ApplicationStatus::InDev);
        let apps = vec![online, offline];

        let yes = DevTrackingFilter {
            online: Some(true),
            ..Default::default()
        };
        let no = DevTrackingFilter {
            online: Some(false),
            ..Default::default()
        };
        assert_eq!(ids(yes.apply(&apps)), vec!["a"]);
        assert_eq!(ids(no.apply(&apps)), vec!["b"]);
    }

    #[test]
    fn test_pending_release_filter() {
        let seed = BuiltinSeed.load().unwrap();

        assert_eq!(ids(PendingReleaseFilter::default().apply(&seed.applications)), vec!["103"]);

        let by_id = PendingReleaseFilter {
            keyword: "03".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(by_id.apply(&seed.applications)), vec!["103"]);

        let by_creator = PendingReleaseFilter {
            creator: "张三".to_string(),
            ..Default::default()
        };
        assert!(by_creator.apply(&seed.applications).is_empty());
    }

    #[test]
    fn test_pending_release_id_match_is_case_sensitive() {
        let app = Application {
            id: "REL-7".to_string(),
            ..sample_application("x", ApplicationStatus::ReadyToRelease)
        };
        let lower = PendingReleaseFilter {
            keyword: "rel".to_string(),
            ..Default::default()
        };
        let upper = PendingReleaseFilter {
            keyword: "REL".to_string(),
            ..Default::default()
        };
        assert!(!lower.matches(&app));
        assert!(upper.matches(&app));
    }

    #[test]
    fn test_rule_filter_on_sample() {
        let filter = RuleFilter {
            creator: "李".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&sample_rule("1")));
    }
}
