//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{DatabaseCatalog, DatabaseCore};
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
///
/// The connection sits behind an `Option` so [`DatabaseCore::close`] can
/// release it while the backend is still borrowed by the migrator.
pub struct DuckDbBackend {
    conn: Mutex<Option<Connection>>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    /// Run `f` against the open connection
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> DbResult<T>) -> DbResult<T> {
        let guard = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| DbError::ConnectionError("connection already closed".to_string()))?;
        f(conn)
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        self.with_conn(|conn| {
            conn.execute(sql, [])
                .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
        })
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        self.with_conn(|conn| {
            conn.execute_batch(sql)
                .map_err(|e| DbError::ExecutionError(e.to_string()))
        })
    }

    /// List schemas synchronously
    fn list_schemas_sync(&self, like_pattern: &str) -> DbResult<Vec<String>> {
        self.with_conn(|conn| {
            // DISTINCT: schemata has one row per attached catalog
            let mut stmt = conn.prepare(
                "SELECT DISTINCT schema_name FROM information_schema.schemata \
                 WHERE schema_name LIKE ? ESCAPE '\\' ORDER BY schema_name",
            )?;
            let rows = stmt.query_map(duckdb::params![like_pattern], |row| {
                row.get::<_, String>(0)
            })?;
            let names = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(names)
        })
    }

    /// Count catalog rows synchronously
    fn count_sync(&self, sql: &str, params: &[&str]) -> DbResult<i64> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row(sql, duckdb::params_from_iter(params.iter()), |row| {
                    row.get(0)
                })?;
            Ok(count)
        })
    }
}

#[async_trait]
impl DatabaseCore for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }

    async fn close(&self) {
        let taken = match self.conn.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(conn) = taken {
            if let Err((_, e)) = conn.close() {
                log::warn!("DuckDB connection did not close cleanly: {}", e);
            }
        }
    }
}

#[async_trait]
impl DatabaseCatalog for DuckDbBackend {
    async fn list_schemas(&self, like_pattern: &str) -> DbResult<Vec<String>> {
        self.list_schemas_sync(like_pattern)
    }

    async fn table_exists(&self, schema: &str, table: &str) -> DbResult<bool> {
        let count = self.count_sync(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = ? AND table_name = ?",
            &[schema, table],
        )?;
        Ok(count > 0)
    }

    async fn column_exists(&self, schema: &str, table: &str, column: &str) -> DbResult<bool> {
        let count = self.count_sync(
            "SELECT COUNT(*) FROM information_schema.columns \
             WHERE table_schema = ? AND table_name = ? AND column_name = ?",
            &[schema, table, column],
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
