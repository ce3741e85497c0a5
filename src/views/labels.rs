//! Display labels and their parsing
//!
//! Filter drop-downs show a placeholder label that means "any"; parsing one
//! yields `None`. The English status names are accepted alongside the labels.

use crate::errors::{Result, RuledeskError};
use crate::schemas::{ApplicationStatus, ApplicationType, DevStatus, RuleStatus};

/// Wildcard for the reward/penalty level filter
pub const ALL_LEVELS: &str = "全部层级";

/// Wildcard for the dimension filter
pub const ALL_DIMENSIONS: &str = "全部维度";

/// Wildcard for the application type filter
pub const ANY_TYPE: &str = "申请类型";

/// Wildcard for the application status filter
pub const ANY_STATUS: &str = "状态";

/// Wildcard for the online-capable filter
pub const ANY_ONLINE: &str = "是否线上化";

/// Wildcard for the dev status filter
pub const ANY_DEV_STATUS: &str = "研发状态";

pub fn rule_status_label(status: RuleStatus) -> &'static str {
    match status {
        RuleStatus::Active => "应用中",
        RuleStatus::Inactive | RuleStatus::Deprecated => "已下线",
    }
}

pub fn application_status_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Draft => "草稿",
        ApplicationStatus::Pending => "审批中",
        ApplicationStatus::Rejected => "已驳回",
        ApplicationStatus::Approved => "待研发",
        ApplicationStatus::InDev => "研发中",
        ApplicationStatus::ReadyToRelease => "待发布",
        ApplicationStatus::Released => "已发布",
    }
}

pub fn application_type_label(application_type: ApplicationType) -> &'static str {
    match application_type {
        ApplicationType::New => "新增",
        ApplicationType::Iterate => "迭代",
        ApplicationType::Delete => "删除",
    }
}

pub fn dev_status_label(dev_status: DevStatus) -> &'static str {
    match dev_status {
        DevStatus::Pending => "待研发",
        DevStatus::InProgress => "研发中",
        DevStatus::Testing => "测试中",
        DevStatus::Done => "已完成",
    }
}

pub fn online_label(online: bool) -> &'static str {
    if online {
        "是"
    } else {
        "否"
    }
}

fn is_wildcard(label: &str, wildcard: &str) -> bool {
    let label = label.trim();
    label.is_empty() || label == wildcard
}

fn invalid(kind: &str, label: &str) -> RuledeskError {
    RuledeskError::InvalidArgument(format!("unknown {} '{}'", kind, label))
}

/// Level or dimension selection: the wildcard means any
pub fn parse_choice(label: &str, wildcard: &str) -> Option<String> {
    if is_wildcard(label, wildcard) {
        None
    } else {
        Some(label.trim().to_string())
    }
}

pub fn parse_application_status_label(label: &str) -> Result<Option<ApplicationStatus>> {
    if is_wildcard(label, ANY_STATUS) {
        return Ok(None);
    }
    let status = match label.trim() {
        "草稿" => ApplicationStatus::Draft,
        "审批中" => ApplicationStatus::Pending,
        "已驳回" => ApplicationStatus::Rejected,
        "待研发" => ApplicationStatus::Approved,
        "研发中" => ApplicationStatus::InDev,
        "待发布" => ApplicationStatus::ReadyToRelease,
        "已发布" => ApplicationStatus::Released,
        other => other
            .parse::<ApplicationStatus>()
            .map_err(|_| invalid("status", other))?,
    };
    Ok(Some(status))
}

pub fn parse_application_type_label(label: &str) -> Result<Option<ApplicationType>> {
    if is_wildcard(label, ANY_TYPE) {
        return Ok(None);
    }
    let application_type = match label.trim() {
        "新增" => ApplicationType::New,
        "迭代" => ApplicationType::Iterate,
        other => other
            .parse::<ApplicationType>()
            .map_err(|_| invalid("type", other))?,
    };
    Ok(Some(application_type))
}

pub fn parse_dev_status_label(label: &str) -> Result<Option<DevStatus>> {
    if is_wildcard(label, ANY_DEV_STATUS) {
        return Ok(None);
    }
    let dev_status = match label.trim() {
        "待研发" => DevStatus::Pending,
        "研发中" => DevStatus::InProgress,
        "测试中" => DevStatus::Testing,
        "已完成" => DevStatus::Done,
        other => other
            .parse::<DevStatus>()
            .map_err(|_| invalid("dev status", other))?,
    };
    Ok(Some(dev_status))
}

pub fn parse_online_label(label: &str) -> Result<Option<bool>> {
    if is_wildcard(label, ANY_ONLINE) {
        return Ok(None);
    }
    match label.trim() {
        "是" | "yes" | "true" => Ok(Some(true)),
        "否" | "no" | "false" => Ok(Some(false)),
        other => Err(invalid("online flag", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_status_label() {
        assert_eq!(rule_status_label(RuleStatus::Active), "应用中");
        assert_eq!(rule_status_label(RuleStatus::Inactive), "已下线");
        assert_eq!(rule_status_label(RuleStatus::Deprecated), "已下线");
    }

    #[test]
    fn test_status_labels_parse_back() {
        for status in [
            ApplicationStatus::Draft,
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::InDev,
            ApplicationStatus::ReadyToRelease,
            ApplicationStatus::Released,
        ] {
            let label = application_status_label(status);
            assert_eq!(parse_application_status_label(label).unwrap(), Some(status));
        }
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(parse_application_status_label(ANY_STATUS).unwrap(), None);
        assert_eq!(parse_application_type_label(ANY_TYPE).unwrap(), None);
        assert_eq!(parse_dev_status_label(ANY_DEV_STATUS).unwrap(), None);
        assert_eq!(parse_online_label(ANY_ONLINE).unwrap(), None);
        assert_eq!(parse_online_label("").unwrap(), None);
        assert_eq!(parse_choice(ALL_LEVELS, ALL_LEVELS), None);
        assert_eq!(parse_choice("收派岗", ALL_LEVELS).as_deref(), Some("收派岗"));
        assert_eq!(parse_choice("风控", ALL_DIMENSIONS).as_deref(), Some("风控"));
    }

    #[test]
    fn test_english_names_accepted() {
        assert_eq!(
            parse_application_status_label("Ready to Release").unwrap(),
            Some(ApplicationStatus::ReadyToRelease)
        );
        assert_eq!(
            parse_application_type_label("iterate").unwrap(),
            Some(ApplicationType::Iterate)
        );
        assert_eq!(parse_dev_status_label("Testing").unwrap(), Some(DevStatus::Testing));
    }

    #[test]
    fn test_dev_status_labels() {
        assert_eq!(parse_dev_status_label("待研发").unwrap(), Some(DevStatus::Pending));
        assert_eq!(parse_dev_status_label("已完成").unwrap(), Some(DevStatus::Done));
        assert_eq!(dev_status_label(DevStatus::InProgress), "研发中");
    }

    #[test]
    fn test_unknown_labels_are_invalid_arguments() {
        let err = parse_application_status_label("上线").unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert!(parse_online_label("maybe").is_err());
        assert!(parse_application_type_label("删除?").is_err());
    }

    #[test]
    fn test_type_and_online_labels() {
        assert_eq!(application_type_label(ApplicationType::New), "新增");
        assert_eq!(parse_application_type_label("迭代").unwrap(), Some(ApplicationType::Iterate));
        assert_eq!(online_label(true), "是");
        assert_eq!(parse_online_label("否").unwrap(), Some(false));
    }
}
