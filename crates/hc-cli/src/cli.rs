//! CLI argument definitions using clap derive API
//!
//! Every flag is optional: a bare `hc-migrate` runs the migration with the
//! connection taken from the environment.

use clap::{Parser, ValueEnum};
use hc_core::schema_name::DEFAULT_TENANT_PREFIX;

/// Add the nullable agent_name column to llm_events in every tenant schema
#[derive(Parser, Debug)]
#[command(name = "hc-migrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Name prefix identifying tenant schemas
    #[arg(long, env = "HC_TENANT_PREFIX", default_value = DEFAULT_TENANT_PREFIX)]
    pub prefix: String,

    /// Format of the final report
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Report output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON document with every schema report
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
