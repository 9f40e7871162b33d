//! Migration command implementation

use anyhow::{Context, Result};
use hc_core::RunSummary;
use hc_db::DatabaseCore;
use hc_migrate::Migrator;

use crate::context::RuntimeContext;
use crate::report;

/// Connect, migrate every tenant schema, release the connection, report.
///
/// Per-schema failures are part of the returned summary; only connection and
/// discovery failures surface as `Err`.
pub async fn execute(ctx: &RuntimeContext) -> Result<RunSummary> {
    log::info!("Connecting to {}", ctx.config.redacted());
    let db = hc_db::connect(&ctx.config)
        .await
        .context("Failed to connect to database")?;

    // Nothing between connect and close may return early: the connection is
    // released exactly once on every path.
    let result = Migrator::new(db.as_ref(), ctx.plan.clone()).run().await;
    db.close().await;
    log::debug!("Database connection released");

    let (reports, summary) = result.context("Failed to discover tenant schemas")?;
    report::print(&reports, &summary, ctx.output)?;
    Ok(summary)
}
