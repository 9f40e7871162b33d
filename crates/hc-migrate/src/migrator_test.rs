use super::*;
use async_trait::async_trait;
use hc_db::DbError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory catalog that records every call and can fail the column add
/// for chosen schemas.
#[derive(Default)]
struct FakeCatalog {
    schemas: Vec<String>,
    /// schema -> columns of its llm_events table
    tables: Mutex<HashMap<String, HashSet<String>>>,
    deny_alter: HashSet<String>,
    fail_listing: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn with_schema(mut self, schema: &str, columns: Option<&[&str]>) -> Self {
        self.schemas.push(schema.to_string());
        if let Some(columns) = columns {
            self.tables.get_mut().unwrap().insert(
                schema.to_string(),
                columns.iter().map(|c| c.to_string()).collect(),
            );
        }
        self
    }

    fn deny(mut self, schema: &str) -> Self {
        self.deny_alter.insert(schema.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn alters(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("ALTER"))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DatabaseCore for FakeCatalog {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.record(sql.to_string());
        let mut tables = self.tables.lock().unwrap();
        for (schema, columns) in tables.iter_mut() {
            if sql.contains(&format!("\"{}\".", schema)) {
                if self.deny_alter.contains(schema) {
                    return Err(DbError::ExecutionError(format!(
                        "permission denied for schema {}",
                        schema
                    )));
                }
                columns.insert("agent_name".to_string());
                return Ok(0);
            }
        }
        Err(DbError::TableNotFound(sql.to_string()))
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute(sql).await.map(|_| ())
    }

    fn db_type(&self) -> &'static str {
        "fake"
    }

    async fn close(&self) {
        self.record("close".to_string());
    }
}

#[async_trait]
impl DatabaseCatalog for FakeCatalog {
    async fn list_schemas(&self, like_pattern: &str) -> DbResult<Vec<String>> {
        self.record(format!("list_schemas {}", like_pattern));
        if self.fail_listing {
            return Err(DbError::ConnectionError("server closed the connection".to_string()));
        }
        // Deliberately unordered to check the migrator sorts
        let mut schemas = self.schemas.clone();
        schemas.reverse();
        Ok(schemas)
    }

    async fn table_exists(&self, schema: &str, table: &str) -> DbResult<bool> {
        self.record(format!("table_exists {}.{}", schema, table));
        Ok(self.tables.lock().unwrap().contains_key(schema))
    }

    async fn column_exists(&self, schema: &str, table: &str, column: &str) -> DbResult<bool> {
        self.record(format!("column_exists {}.{}.{}", schema, table, column));
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(schema)
            .is_some_and(|cols| cols.contains(column)))
    }
}

fn outcomes(reports: &[SchemaReport]) -> Vec<(&str, &MigrationOutcome)> {
    reports
        .iter()
        .map(|r| (r.schema.as_str(), &r.outcome))
        .collect()
}

#[tokio::test]
async fn test_classifies_each_schema() {
    let db = FakeCatalog::default()
        .with_schema("team_a", Some(&["id"]))
        .with_schema("team_b", None)
        .with_schema("team_c", Some(&["id", "agent_name"]));

    let migrator = Migrator::new(&db, MigrationPlan::default());
    let (reports, summary) = migrator.run().await.unwrap();

    assert_eq!(
        outcomes(&reports),
        vec![
            ("team_a", &MigrationOutcome::Migrated),
            ("team_b", &MigrationOutcome::Skipped(SkipReason::TableAbsent)),
            ("team_c", &MigrationOutcome::Skipped(SkipReason::ColumnPresent)),
        ]
    );
    assert_eq!(summary.total, 3);
    assert_eq!(summary.migrated, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_success());
}

#[tokio::test]
async fn test_discovery_uses_escaped_prefix_and_sorts() {
    let db = FakeCatalog::default()
        .with_schema("team_a", None)
        .with_schema("team_c", None)
        .with_schema("team_b", None);

    let migrator = Migrator::new(&db, MigrationPlan::default());
    let names = migrator.discover_schemas().await.unwrap();

    assert_eq!(names, vec!["team_a", "team_b", "team_c"]);
    assert_eq!(db.calls(), vec![r"list_schemas team\_%".to_string()]);
}

#[tokio::test]
async fn test_table_absent_issues_no_alter() {
    let db = FakeCatalog::default().with_schema("team_empty", None);

    let (reports, _) = Migrator::new(&db, MigrationPlan::default())
        .run()
        .await
        .unwrap();

    assert_eq!(
        reports[0].outcome,
        MigrationOutcome::Skipped(SkipReason::TableAbsent)
    );
    assert!(db.alters().is_empty());
    assert!(!db
        .calls()
        .iter()
        .any(|c| c.starts_with("column_exists team_empty")));
}

#[tokio::test]
async fn test_second_run_migrates_nothing() {
    let db = FakeCatalog::default()
        .with_schema("team_a", Some(&["id"]))
        .with_schema("team_b", Some(&["id"]))
        .with_schema("team_c", None);

    let migrator = Migrator::new(&db, MigrationPlan::default());
    let (_, first) = migrator.run().await.unwrap();
    assert_eq!(first.migrated, 2);

    let (reports, second) = migrator.run().await.unwrap();
    assert_eq!(second.migrated, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(
        reports
            .iter()
            .filter(|r| r.outcome == MigrationOutcome::Skipped(SkipReason::ColumnPresent))
            .count(),
        2
    );
    assert_eq!(db.alters().len(), 2);
}

#[tokio::test]
async fn test_single_failure_is_isolated() {
    let db = FakeCatalog::default()
        .with_schema("team_a", Some(&["id"]))
        .with_schema("team_b", Some(&["id"]))
        .with_schema("team_c", Some(&["id"]))
        .with_schema("team_d", None)
        .deny("team_b");

    let (reports, summary) = Migrator::new(&db, MigrationPlan::default())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.migrated, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert!(!summary.is_success());

    match &reports[1].outcome {
        MigrationOutcome::Failed(message) => {
            assert_eq!(reports[1].schema, "team_b");
            assert!(message.contains("permission denied"));
        }
        other => panic!("expected failure for team_b, got {:?}", other),
    }
    // team_c still processed after the failure
    assert_eq!(reports[2].outcome, MigrationOutcome::Migrated);
    assert_eq!(reports[3].outcome, MigrationOutcome::Skipped(SkipReason::TableAbsent));
}

#[tokio::test]
async fn test_no_schemas_found() {
    let db = FakeCatalog::default();

    let (reports, summary) = Migrator::new(&db, MigrationPlan::default())
        .run()
        .await
        .unwrap();

    assert!(reports.is_empty());
    assert_eq!(summary.total, 0);
    assert!(summary.is_success());
    // Only the enumeration query ran
    assert_eq!(db.calls().len(), 1);
}

#[tokio::test]
async fn test_discovery_failure_is_fatal() {
    let db = FakeCatalog {
        fail_listing: true,
        ..FakeCatalog::default()
    }
    .with_schema("team_a", Some(&["id"]));

    let err = Migrator::new(&db, MigrationPlan::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ConnectionError(_)));
    assert_eq!(db.calls().len(), 1);
}

#[tokio::test]
async fn test_rejected_identifier_is_never_interpolated() {
    let db = FakeCatalog::default()
        .with_schema(r#"team_x"; DROP SCHEMA public; --"#, Some(&["id"]))
        .with_schema("team_ok", Some(&["id"]));

    let (reports, summary) = Migrator::new(&db, MigrationPlan::default())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.migrated, 1);
    let rejected = reports
        .iter()
        .find(|r| r.schema.contains("DROP"))
        .unwrap();
    assert!(matches!(
        &rejected.outcome,
        MigrationOutcome::Failed(m) if m.contains("rejected schema identifier")
    ));

    assert_eq!(db.alters().len(), 1);
    assert!(db.calls().iter().all(|c| !c.contains("DROP")));
}

#[tokio::test]
async fn test_custom_prefix() {
    let db = FakeCatalog::default().with_schema("org_1", Some(&["id"]));
    let plan = MigrationPlan {
        prefix: TenantPrefix::parse("org_").unwrap(),
        ..MigrationPlan::default()
    };

    let migrator = Migrator::new(&db, plan);
    let (reports, _) = migrator.run().await.unwrap();

    assert_eq!(reports[0].outcome, MigrationOutcome::Migrated);
    assert_eq!(db.calls()[0], r"list_schemas org\_%");
    assert_eq!(
        db.alters(),
        vec![r#"ALTER TABLE "org_1"."llm_events" ADD COLUMN "agent_name" TEXT"#.to_string()]
    );
}
