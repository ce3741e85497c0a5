//! Schema types for ruledesk
//!
//! Records serialize with camelCase keys and the original status labels so
//! seed files keep the shape the console has always used.

mod application;
mod config;
mod draft;
mod rule;

pub use application::{
    Application, ApplicationStatus, ApplicationType, Calculation, DevStatus, OnlineSourcing,
    TractionGoal,
};
pub use config::{ApprovalMode, Config, ReleaseDefaults};
pub use draft::{ApplicationDraft, DesiredStatus, SubmitMode, SubmitRequest};
pub use rule::{Rule, RuleStatus};

#[cfg(test)]
pub(crate) use application::sample_application;
#[cfg(test)]
pub(crate) use rule::sample_rule;
