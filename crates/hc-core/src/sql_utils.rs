//! SQL identifier quoting utilities
//!
//! Provides safe quoting for SQL identifiers and `LIKE` patterns when
//! constructing dynamic SQL statements.

/// Quote a SQL identifier to prevent injection.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use hc_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("llm_events"), r#""llm_events""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a schema-qualified relation as `"schema"."table"`.
///
/// Unlike splitting on `.`, both parts are quoted as given.
pub fn quote_relation(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Build a `LIKE` pattern matching every value that starts with `prefix`.
///
/// `%`, `_` and `\` in the prefix are escaped with a backslash, so the pattern
/// must be used with `ESCAPE '\'`.
///
/// # Examples
/// ```
/// use hc_core::sql_utils::like_prefix_pattern;
/// assert_eq!(like_prefix_pattern("team_"), r"team\_%");
/// ```
pub fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 2);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
