//! hc-migrate - Tenant schema migrator
//!
//! Discovers every tenant schema, then adds the target column to each one
//! that has the target table and lacks the column. Schemas are handled one at
//! a time, in name order, and a failure in one schema never stops the run.

pub mod migrator;
pub mod statement;

pub use migrator::{MigrationPlan, Migrator};
