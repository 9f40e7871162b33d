//! Migration execution

use crate::statement::add_column_sql;
use hc_core::sql_utils::like_prefix_pattern;
use hc_core::{
    MigrationOutcome, RunSummary, SchemaName, SchemaReport, SkipReason, TargetColumn, TenantPrefix,
};
use hc_db::{Database, DatabaseCatalog, DatabaseCore, DbResult};
use std::time::{Duration, Instant};

/// What to migrate: which schemas, and which column to add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Naming convention selecting tenant schemas
    pub prefix: TenantPrefix,

    /// Column to add to each tenant's table
    pub column: TargetColumn,
}

impl Default for MigrationPlan {
    fn default() -> Self {
        Self {
            prefix: TenantPrefix::default(),
            column: TargetColumn::AGENT_NAME,
        }
    }
}

/// Runs the additive migration across all tenant schemas
pub struct Migrator<'a> {
    db: &'a dyn Database,
    plan: MigrationPlan,
}

impl<'a> Migrator<'a> {
    /// Create a new migrator
    pub fn new(db: &'a dyn Database, plan: MigrationPlan) -> Self {
        Self { db, plan }
    }

    /// Catalog names of every schema carrying the tenant prefix, sorted.
    ///
    /// Names are returned as the catalog reports them; they still have to
    /// pass [`SchemaName::parse`] before being used in a statement.
    pub async fn discover_schemas(&self) -> DbResult<Vec<String>> {
        let pattern = like_prefix_pattern(self.plan.prefix.as_str());
        let mut names = self.db.list_schemas(&pattern).await?;
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Check and, if needed, migrate one schema.
    ///
    /// Never fails: database errors become [`MigrationOutcome::Failed`].
    pub async fn migrate_schema(&self, schema: &SchemaName) -> SchemaReport {
        let start = Instant::now();
        let outcome = match self.apply(schema).await {
            Ok(outcome) => outcome,
            Err(e) => MigrationOutcome::Failed(e.to_string()),
        };
        SchemaReport::new(schema.as_str(), outcome, start.elapsed())
    }

    async fn apply(&self, schema: &SchemaName) -> DbResult<MigrationOutcome> {
        let column = &self.plan.column;

        if !self.db.table_exists(schema, column.table).await? {
            log::debug!("{}: no {} table", schema, column.table);
            return Ok(MigrationOutcome::Skipped(SkipReason::TableAbsent));
        }

        if self
            .db
            .column_exists(schema, column.table, column.column)
            .await?
        {
            log::debug!("{}: {} already present", schema, column.column);
            return Ok(MigrationOutcome::Skipped(SkipReason::ColumnPresent));
        }

        let sql = add_column_sql(schema, column);
        log::debug!("{}: {}", schema, sql);
        self.db.execute(&sql).await?;
        Ok(MigrationOutcome::Migrated)
    }

    /// Discover tenant schemas, then migrate each in order.
    ///
    /// Only a discovery failure is returned as an error; per-schema failures
    /// are recorded in the reports and the run continues.
    pub async fn run(&self) -> DbResult<(Vec<SchemaReport>, RunSummary)> {
        let start = Instant::now();
        log::info!(
            "Adding column {} to schemas matching '{}*' ({})",
            self.plan.column,
            self.plan.prefix,
            self.db.db_type()
        );

        let names = self.discover_schemas().await?;
        if names.is_empty() {
            log::info!("No schemas found with prefix '{}'", self.plan.prefix);
            return Ok((Vec::new(), RunSummary::from_reports(&[], start.elapsed())));
        }
        log::info!("Found {} tenant schemas", names.len());

        let mut reports = Vec::with_capacity(names.len());
        for name in names {
            let report = match SchemaName::parse(name.as_str(), &self.plan.prefix) {
                Ok(schema) => self.migrate_schema(&schema).await,
                Err(e) => SchemaReport::new(
                    name,
                    MigrationOutcome::Failed(format!("rejected schema identifier: {}", e)),
                    Duration::ZERO,
                ),
            };
            log_report(&report);
            reports.push(report);
        }

        let summary = RunSummary::from_reports(&reports, start.elapsed());
        log::info!(
            "Migration finished: {} total, {} migrated, {} skipped, {} failed",
            summary.total,
            summary.migrated,
            summary.skipped,
            summary.failed
        );
        Ok((reports, summary))
    }
}

fn log_report(report: &SchemaReport) {
    match &report.outcome {
        MigrationOutcome::Failed(message) => {
            log::error!("{}: migration failed: {}", report.schema, message)
        }
        outcome => log::info!("{}: {}", report.schema, outcome),
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
