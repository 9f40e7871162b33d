//! Database trait definitions

use crate::error::DbResult;
use async_trait::async_trait;

/// Statement execution and connection lifecycle
#[async_trait]
pub trait DatabaseCore: Send + Sync {
    /// Execute a single SQL statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Release the connection. Calling it again is a no-op, and every
    /// operation after it fails with a connection error.
    async fn close(&self);
}

/// Catalog introspection used to discover and classify tenant schemas
#[async_trait]
pub trait DatabaseCatalog: Send + Sync {
    /// Schema names matching a `LIKE` pattern (escape character `\`),
    /// ordered by name
    async fn list_schemas(&self, like_pattern: &str) -> DbResult<Vec<String>>;

    /// Check if `schema.table` exists
    async fn table_exists(&self, schema: &str, table: &str) -> DbResult<bool>;

    /// Check if `schema.table` has `column`
    async fn column_exists(&self, schema: &str, table: &str, column: &str) -> DbResult<bool>;
}

/// Everything the migrator needs from a backend
pub trait Database: DatabaseCore + DatabaseCatalog {}

impl<T: DatabaseCore + DatabaseCatalog> Database for T {}
