//! Per-schema migration outcomes and the run summary.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why a schema was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The schema has no target table
    TableAbsent,
    /// The target table already carries the column
    ColumnPresent,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TableAbsent => write!(f, "table absent"),
            SkipReason::ColumnPresent => write!(f, "column already present"),
        }
    }
}

/// Classification of a single schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum MigrationOutcome {
    /// The column was added
    Migrated,
    /// Nothing to do
    Skipped(SkipReason),
    /// A check or the column add failed; carries the error message
    Failed(String),
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationOutcome::Migrated => write!(f, "migrated"),
            MigrationOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            MigrationOutcome::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Outcome of one schema, as reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    /// Schema name as returned by the catalog
    pub schema: String,

    /// What happened to it
    pub outcome: MigrationOutcome,

    /// How long the checks and statement took (in milliseconds)
    pub duration_ms: u64,
}

impl SchemaReport {
    pub fn new(schema: impl Into<String>, outcome: MigrationOutcome, duration: Duration) -> Self {
        Self {
            schema: schema.into(),
            outcome,
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Aggregate counts for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Schemas discovered
    pub total: usize,

    /// Schemas that received the column
    pub migrated: usize,

    /// Schemas left untouched
    pub skipped: usize,

    /// Schemas that failed
    pub failed: usize,

    /// Wall time of the whole run (in milliseconds)
    pub duration_ms: u64,
}

impl RunSummary {
    /// Create a summary from per-schema reports
    pub fn from_reports(reports: &[SchemaReport], duration: Duration) -> Self {
        let mut summary = Self {
            total: reports.len(),
            duration_ms: duration.as_millis() as u64,
            ..Self::default()
        };
        for report in reports {
            match report.outcome {
                MigrationOutcome::Migrated => summary.migrated += 1,
                MigrationOutcome::Skipped(_) => summary.skipped += 1,
                MigrationOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// True when no schema failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
