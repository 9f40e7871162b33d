//! Runtime context for the migration run

use anyhow::{Context, Result};
use hc_core::{ConnectionConfig, TargetColumn, TenantPrefix};
use hc_migrate::MigrationPlan;

use crate::cli::{Cli, OutputFormat};

/// Everything resolved before the database is touched
#[derive(Debug)]
pub struct RuntimeContext {
    /// Where to connect
    pub config: ConnectionConfig,

    /// Which schemas and which column
    pub plan: MigrationPlan,

    /// Report format
    pub output: OutputFormat,
}

impl RuntimeContext {
    /// Resolve the context from CLI arguments and the process environment
    pub fn new(cli: &Cli) -> Result<Self> {
        let config =
            ConnectionConfig::from_env().context("Failed to resolve database configuration")?;
        let prefix = TenantPrefix::parse(cli.prefix.as_str())
            .context("Invalid tenant schema prefix")?;

        Ok(Self {
            config,
            plan: MigrationPlan {
                prefix,
                column: TargetColumn::AGENT_NAME,
            },
            output: cli.output,
        })
    }
}
