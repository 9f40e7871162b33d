//! DDL generation

use hc_core::sql_utils::{quote_ident, quote_relation};
use hc_core::{SchemaName, TargetColumn};

/// `ALTER TABLE "<schema>"."<table>" ADD COLUMN "<column>" <type>`
///
/// Only accepts a validated [`SchemaName`]; table and column come from the
/// compiled-in descriptor. All three identifiers are quoted.
pub fn add_column_sql(schema: &SchemaName, column: &TargetColumn) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote_relation(schema.as_str(), column.table),
        quote_ident(column.column),
        column.sql_type
    )
}
