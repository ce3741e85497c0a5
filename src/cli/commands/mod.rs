//! CLI command implementations

pub mod applications;
pub mod dev;
pub mod doctor;
pub mod history;
pub mod init;
pub mod pending;
pub mod rules;
pub mod session;
pub mod show;
pub mod stats;
