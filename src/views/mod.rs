//! Read-only views over the desk: list filters, labels and statistics

mod filters;
mod labels;
mod stats;

pub use filters::{ApplicationFilter, DevTrackingFilter, PendingReleaseFilter, RuleFilter};
pub use labels::{
    application_status_label, application_type_label, dev_status_label, online_label,
    parse_application_status_label, parse_application_type_label, parse_choice,
    parse_dev_status_label, parse_online_label, rule_status_label, ALL_DIMENSIONS, ALL_LEVELS,
    ANY_DEV_STATUS, ANY_ONLINE, ANY_STATUS, ANY_TYPE,
};
pub use stats::{LevelCount, RuleStats, KNOWN_LEVELS};
