//! Ruledesk - Governance desk for reward/penalty rules and their change applications
//!
//! This library provides the core functionality for the ruledesk CLI, including:
//! - Schema definitions for rules, applications, drafts and config
//! - Domain logic for the application lifecycle and rule lineage
//! - The desk, which owns both collections and the approval channel
//! - Seed providers, list filters and statistics
//! - File system utilities for reading/writing JSON

pub mod cli;
pub mod config;
pub mod desk;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod seed;
pub mod views;

// Re-export commonly used types
pub use desk::{Desk, Intent, IntentOutcome};
pub use errors::{Result, RuledeskError};
pub use schemas::{Application, ApplicationDraft, Config, Rule};
