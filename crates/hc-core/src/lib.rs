//! hc-core - Core library for the honeycomb tenant migrator
//!
//! This crate provides the validated identifier types, the fixed column
//! descriptor, per-schema outcomes and run summaries, connection
//! configuration, and SQL quoting helpers shared by the other crates.

pub mod column;
pub mod config;
pub mod error;
pub mod outcome;
pub mod schema_name;
pub mod sql_utils;

pub use column::TargetColumn;
pub use config::{ConnectionConfig, DbType};
pub use error::{CoreError, CoreResult};
pub use outcome::{MigrationOutcome, RunSummary, SchemaReport, SkipReason};
pub use schema_name::{SchemaName, TenantPrefix};
