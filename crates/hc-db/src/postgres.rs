//! PostgreSQL database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{DatabaseCatalog, DatabaseCore};
use async_trait::async_trait;
use hc_core::ConnectionConfig;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;

/// PostgreSQL database backend
///
/// Holds a pool capped at one connection: the migrator works strictly
/// sequentially and should put as little load on the server as possible.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Connect using the resolved configuration
    pub async fn connect(config: &ConnectionConfig) -> DbResult<Self> {
        let options = match &config.url {
            Some(url) => PgConnectOptions::from_str(url)
                .map_err(|e| DbError::ConnectionError(e.to_string()))?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.database),
        };

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", config.redacted(), e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseCore for PostgresBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        let result = sqlx::query(sql).execute(&self.pool).await?;
        Ok(result.rows_affected() as usize)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

// Catalog checks read pg_catalog: information_schema hides objects the
// connecting role holds no privileges on, and those must still be reported.
#[async_trait]
impl DatabaseCatalog for PostgresBackend {
    async fn list_schemas(&self, like_pattern: &str) -> DbResult<Vec<String>> {
        // Order bytewise so output does not depend on the server locale
        let names = sqlx::query_scalar::<_, String>(
            r#"SELECT nspname::text
               FROM pg_catalog.pg_namespace
               WHERE nspname::text LIKE $1 ESCAPE '\'
               ORDER BY nspname::text COLLATE "C""#,
        )
        .bind(like_pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn table_exists(&self, schema: &str, table: &str) -> DbResult<bool> {
        // Tables, partitioned and foreign tables, plus views so that an ALTER
        // against one is reported instead of skipped
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1
                 FROM pg_catalog.pg_class c
                 JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
                 WHERE n.nspname::text = $1
                   AND c.relname::text = $2
                   AND c.relkind IN ('r', 'p', 'f', 'v', 'm')
             )",
        )
        .bind(schema)
        .bind(table)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn column_exists(&self, schema: &str, table: &str, column: &str) -> DbResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1
                 FROM pg_catalog.pg_attribute a
                 JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
                 JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
                 WHERE n.nspname::text = $1
                   AND c.relname::text = $2
                   AND a.attname::text = $3
                   AND a.attnum > 0
                   AND NOT a.attisdropped
             )",
        )
        .bind(schema)
        .bind(table)
        .bind(column)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
