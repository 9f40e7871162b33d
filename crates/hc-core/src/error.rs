//! Error types for hc-core

use thiserror::Error;

/// Core error type for the tenant migrator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// C001: Schema name outside the tenant allow-list
    #[error("[C001] Invalid schema name '{name}': {reason}")]
    InvalidSchemaName { name: String, reason: String },

    /// C002: Tenant prefix is not a usable identifier prefix
    #[error("[C002] Invalid tenant prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// C003: Invalid connection configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
