//! Validated tenant schema identifiers.
//!
//! Schema names discovered from the catalog end up interpolated into DDL,
//! since identifiers cannot be bound as statement parameters. Every name is
//! therefore checked against an explicit allow-list before it can be
//! represented as a [`SchemaName`].

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Longest identifier PostgreSQL keeps without truncation (NAMEDATALEN - 1).
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Prefix used when none is configured.
pub const DEFAULT_TENANT_PREFIX: &str = "team_";

fn is_ident_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// Naming-convention prefix shared by every tenant schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantPrefix(String);

impl TenantPrefix {
    /// Validate and wrap a prefix.
    ///
    /// The prefix must start with a lowercase letter and contain only
    /// `[a-z0-9_]`.
    pub fn parse(prefix: impl Into<String>) -> CoreResult<Self> {
        let prefix = prefix.into();
        let invalid = |reason: &str| CoreError::InvalidPrefix {
            prefix: prefix.clone(),
            reason: reason.to_string(),
        };

        let first = prefix.chars().next().ok_or_else(|| invalid("empty"))?;
        if !first.is_ascii_lowercase() {
            return Err(invalid("must start with a lowercase letter"));
        }
        if !prefix.chars().all(is_ident_char) {
            return Err(invalid("only [a-z0-9_] allowed"));
        }
        if prefix.len() >= MAX_IDENTIFIER_LEN {
            return Err(invalid("leaves no room for a tenant suffix"));
        }
        Ok(Self(prefix))
    }

    /// Return the prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TenantPrefix {
    fn default() -> Self {
        Self(DEFAULT_TENANT_PREFIX.to_string())
    }
}

impl fmt::Display for TenantPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tenant schema name that passed the allow-list check.
///
/// Only constructible through [`SchemaName::parse`], so holding one means the
/// name starts with the tenant prefix, has a non-empty suffix, uses only
/// `[a-z0-9_]` and fits in [`MAX_IDENTIFIER_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SchemaName(String);

impl SchemaName {
    /// Validate a catalog schema name against the tenant naming convention.
    pub fn parse(name: impl Into<String>, prefix: &TenantPrefix) -> CoreResult<Self> {
        let name = name.into();
        let invalid = |reason: String| CoreError::InvalidSchemaName {
            name: name.clone(),
            reason,
        };

        let suffix = name
            .strip_prefix(prefix.as_str())
            .ok_or_else(|| invalid(format!("missing tenant prefix '{}'", prefix)))?;
        if suffix.is_empty() {
            return Err(invalid("empty tenant suffix".to_string()));
        }
        if let Some(bad) = suffix.chars().find(|c| !is_ident_char(*c)) {
            return Err(invalid(format!("disallowed character {:?}", bad)));
        }
        if name.len() > MAX_IDENTIFIER_LEN {
            return Err(invalid(format!(
                "longer than {} bytes",
                MAX_IDENTIFIER_LEN
            )));
        }
        Ok(Self(name))
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemaName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for SchemaName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SchemaName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SchemaName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SchemaName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "schema_name_test.rs"]
mod tests;
