//! Final run report

use anyhow::Result;
use hc_core::{MigrationOutcome, RunSummary, SchemaReport};

use crate::cli::OutputFormat;

/// Print the report for a finished run to stdout
pub fn print(reports: &[SchemaReport], summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(reports, summary)),
        OutputFormat::Json => println!("{}", render_json(reports, summary)?),
    }
    Ok(())
}

fn render_text(reports: &[SchemaReport], summary: &RunSummary) -> String {
    let mut out = String::new();

    if summary.total == 0 {
        out.push_str("No tenant schemas found, nothing to migrate.\n");
    }

    let failures: Vec<(&str, &str)> = reports
        .iter()
        .filter_map(|r| match &r.outcome {
            MigrationOutcome::Failed(message) => Some((r.schema.as_str(), message.as_str())),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        out.push_str("\nFailed schemas:\n");
        for (schema, message) in &failures {
            out.push_str(&format!("  ✗ {} - {}\n", schema, message));
        }
    }

    out.push_str("\nMigration summary\n");
    out.push_str(&format!("  total:    {}\n", summary.total));
    out.push_str(&format!("  migrated: {}\n", summary.migrated));
    out.push_str(&format!("  skipped:  {}\n", summary.skipped));
    out.push_str(&format!("  failed:   {}\n", summary.failed));
    out.push_str(&format!("  ({} ms)\n", summary.duration_ms));
    out
}

fn render_json(reports: &[SchemaReport], summary: &RunSummary) -> Result<String> {
    let doc = serde_json::json!({
        "schemas": reports,
        "summary": summary,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_core::SkipReason;
    use std::time::Duration;

    fn sample() -> (Vec<SchemaReport>, RunSummary) {
        let reports = vec![
            SchemaReport::new("team_a", MigrationOutcome::Migrated, Duration::from_millis(4)),
            SchemaReport::new(
                "team_b",
                MigrationOutcome::Failed("permission denied".to_string()),
                Duration::from_millis(1),
            ),
            SchemaReport::new(
                "team_c",
                MigrationOutcome::Skipped(SkipReason::TableAbsent),
                Duration::ZERO,
            ),
        ];
        let summary = RunSummary::from_reports(&reports, Duration::from_millis(9));
        (reports, summary)
    }

    #[test]
    fn test_text_lists_counts_and_failures() {
        let (reports, summary) = sample();
        let text = render_text(&reports, &summary);

        assert!(text.contains("total:    3"));
        assert!(text.contains("migrated: 1"));
        assert!(text.contains("skipped:  1"));
        assert!(text.contains("failed:   1"));
        assert!(text.contains("✗ team_b - permission denied"));
        assert!(!text.contains("team_a"));
    }

    #[test]
    fn test_text_without_schemas() {
        let summary = RunSummary::from_reports(&[], Duration::ZERO);
        let text = render_text(&[], &summary);
        assert!(text.contains("No tenant schemas found"));
        assert!(!text.contains("Failed schemas"));
    }

    #[test]
    fn test_json_document() {
        let (reports, summary) = sample();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&reports, &summary).unwrap()).unwrap();

        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["schemas"][1]["schema"], "team_b");
        assert_eq!(json["schemas"][1]["outcome"]["status"], "failed");
        assert_eq!(json["schemas"][2]["outcome"]["reason"], "table_absent");
    }
}
