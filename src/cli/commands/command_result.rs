use std::path::PathBuf;

use super::super::{args::OutputFormat, exit_status::ExitStatus};
use crate::core::KeyTable;

#[derive(Debug)]
pub enum CommandSummary {
    Status(StatusSummary),
    Init(InitSummary),
}

/// One row of the resource files table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSummary {
    pub locale: String,
    pub is_source: bool,
    /// Path relative to the lang root where possible.
    pub path: PathBuf,
    pub key_count: usize,
}

#[derive(Debug)]
pub struct StatusSummary {
    pub format: OutputFormat,
    pub missing_only: bool,
    pub source_locale: String,
    pub target_locales: Vec<String>,
    pub resources: Vec<ResourceSummary>,
    /// Number of unique keys across all locales.
    pub total_keys: usize,
    /// Number of keys missing a value in at least one locale.
    pub missing_keys: usize,
    /// The table to render; already filtered when `missing_only` is set.
    pub table: KeyTable,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running ivy commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for reports that are informational only).
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
