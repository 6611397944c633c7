//! REPORT phase: final summary as console text or JSON.

use chrono::{DateTime, Utc};
use cwp_config::AlarmName;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::console::Console;
use crate::{SweepOutcome, SweepReport};

/// Per-invocation attribution attached to JSON reports.
#[derive(Clone, Debug, Serialize)]
pub struct RunMeta {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub alarm_list_hash: String,
}

pub fn outcome_line(outcome: SweepOutcome) -> &'static str {
    match outcome {
        SweepOutcome::NothingToDelete => "No alarms to delete.",
        SweepOutcome::Cancelled => "Deletion cancelled by user.",
        SweepOutcome::Completed => "Operation completed.",
        SweepOutcome::CheckOnly => "Check completed.",
    }
}

pub fn render_text(report: &SweepReport, console: &mut Console<'_>) {
    console.blank();

    if report.outcome == SweepOutcome::CheckOnly {
        console.line(format_args!("=== Check Summary ==="));
        console.line(format_args!("{}", outcome_line(report.outcome)));
        console.line(format_args!("Checked: {} alarm(s)", report.checked));
        names_section(console, "Existing", &report.existing);
        names_section(console, "Does not exist", &report.non_existent);
        skipped_section(console, report);
        return;
    }

    console.line(format_args!("=== Final Summary ==="));
    console.line(format_args!("{}", outcome_line(report.outcome)));
    console.line(format_args!("Successfully deleted: {} alarm(s)", report.deleted.len()));
    console.line(format_args!("Failed deletions: {} alarm(s)", report.failed.len()));

    if !report.failed.is_empty() {
        console.blank();
        console.line(format_args!("Failed to delete:"));
        for f in &report.failed {
            console.line(format_args!("  - {} ({})", f.alarm, f.error));
        }
    }

    if !report.deleted.is_empty() {
        console.blank();
        console.line(format_args!("Successfully deleted:"));
        for name in &report.deleted {
            console.line(format_args!("  - {}", name));
        }
    }

    skipped_section(console, report);
}

fn names_section(console: &mut Console<'_>, title: &str, names: &[AlarmName]) {
    console.blank();
    console.line(format_args!("{}: {} alarm(s)", title, names.len()));
    for name in names {
        console.line(format_args!("  - {}", name));
    }
}

fn skipped_section(console: &mut Console<'_>, report: &SweepReport) {
    if report.skipped.is_empty() {
        return;
    }
    console.blank();
    console.line(format_args!(
        "Skipped (existence check failed): {} alarm(s)",
        report.skipped.len()
    ));
    for s in &report.skipped {
        console.line(format_args!("  - {} ({})", s.alarm, s.error));
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    meta: &'a RunMeta,
    #[serde(flatten)]
    report: &'a SweepReport,
}

pub fn render_json(report: &SweepReport, meta: &RunMeta) -> serde_json::Result<Value> {
    serde_json::to_value(JsonReport { meta, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailedDeletion, SkippedCheck};

    fn name(s: &str) -> AlarmName {
        AlarmName::new(s).unwrap()
    }

    fn render(report: &SweepReport) -> String {
        let mut buf = Vec::new();
        {
            let mut console = Console::new(&mut buf);
            render_text(report, &mut console);
        }
        String::from_utf8(buf).unwrap()
    }

    fn completed() -> SweepReport {
        SweepReport {
            outcome: SweepOutcome::Completed,
            checked: 3,
            existing: vec![name("a"), name("b")],
            non_existent: vec![],
            skipped: vec![SkippedCheck {
                alarm: name("c"),
                error: "timeout".to_string(),
            }],
            deleted: vec![name("a")],
            failed: vec![FailedDeletion {
                alarm: name("b"),
                error: "denied".to_string(),
            }],
        }
    }

    #[test]
    fn text_summary_lists_counts_and_members() {
        let text = render(&completed());
        assert!(text.contains("=== Final Summary ==="));
        assert!(text.contains("Operation completed."));
        assert!(text.contains("Successfully deleted: 1 alarm(s)"));
        assert!(text.contains("Failed deletions: 1 alarm(s)"));
        assert!(text.contains("  - b (denied)"));
        assert!(text.contains("  - a\n"));
        assert!(text.contains("  - c (timeout)"));
    }

    #[test]
    fn empty_report_states_zero_counts() {
        let text = render(&SweepReport::empty());
        assert!(text.contains("No alarms to delete."));
        assert!(text.contains("Successfully deleted: 0 alarm(s)"));
        assert!(text.contains("Failed deletions: 0 alarm(s)"));
    }

    #[test]
    fn json_report_carries_meta_and_buckets() {
        let meta = RunMeta {
            run_id: Uuid::nil(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            alarm_list_hash: "abc".to_string(),
        };
        let v = render_json(&completed(), &meta).unwrap();
        assert_eq!(v["outcome"], "completed");
        assert_eq!(v["alarm_list_hash"], "abc");
        assert_eq!(v["deleted"], serde_json::json!(["a"]));
        assert_eq!(v["failed"][0]["alarm"], "b");
        assert_eq!(v["checked"], 3);
    }
}
