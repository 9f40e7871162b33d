//! hc-db - Database abstraction layer for the tenant migrator
//!
//! This crate provides the `Database` traits and implementations for
//! PostgreSQL (the production target) and DuckDB (local files and tests).

pub mod duckdb;
pub mod error;
pub mod postgres;
pub mod traits;

pub use self::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use postgres::PostgresBackend;
pub use traits::{Database, DatabaseCatalog, DatabaseCore};

use hc_core::{ConnectionConfig, DbType};

/// Open the backend selected by `config`.
///
/// The returned handle owns the only connection of the run; callers release
/// it with [`DatabaseCore::close`].
pub async fn connect(config: &ConnectionConfig) -> DbResult<Box<dyn Database>> {
    match config.db_type() {
        DbType::Postgres => Ok(Box::new(PostgresBackend::connect(config).await?)),
        DbType::DuckDb => {
            let path = config.duckdb_path().unwrap_or(":memory:");
            Ok(Box::new(DuckDbBackend::new(path)?))
        }
    }
}
