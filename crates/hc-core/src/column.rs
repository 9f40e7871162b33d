//! Fixed column descriptor for the additive migration.

/// The column added to every tenant schema.
///
/// Not data driven: the migration carries exactly one descriptor, compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetColumn {
    /// Table that receives the column
    pub table: &'static str,

    /// Column name
    pub column: &'static str,

    /// SQL type used in the `ADD COLUMN` clause
    pub sql_type: &'static str,

    /// Whether the column accepts NULL; the additive migration only ever
    /// carries nullable columns, so no constraint clause is emitted
    pub nullable: bool,
}

impl TargetColumn {
    /// `llm_events.agent_name TEXT NULL`, no default, no backfill.
    pub const AGENT_NAME: TargetColumn = TargetColumn {
        table: "llm_events",
        column: "agent_name",
        sql_type: "TEXT",
        nullable: true,
    };

}

impl std::fmt::Display for TargetColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} {}", self.table, self.column, self.sql_type)
    }
}
