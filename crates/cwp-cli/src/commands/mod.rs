//! Command handler modules for the `cwp` binary.
//!
//! Shared steps (alarm list load, backend connect, report output) live here.
//! Command-specific sequencing lives in the submodules.

pub mod check;
pub mod delete;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cwp_cloudwatch::CloudWatchBackend;
use cwp_config::{LoadedAlarmList, TargetConfig, ALARM_LIST_KEY};
use cwp_reconcile::{render_json, render_text, Console, RunMeta, SweepReport};
use uuid::Uuid;

use crate::OutputFormat;

/// Global options shared by every subcommand.
pub struct RunOptions {
    pub environment: String,
    pub region: String,
    pub file: PathBuf,
    pub format: OutputFormat,
}

/// Per-invocation identity, used for the tracing span and the JSON report.
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub format: OutputFormat,
}

impl RunContext {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            format,
        }
    }

    pub fn span(&self) -> tracing::Span {
        tracing::info_span!("sweep", run_id = %self.run_id)
    }
}

/// Where progress lines go: stdout for text reports, stderr when stdout is
/// reserved for JSON.
pub fn progress_writer(format: OutputFormat) -> Box<dyn Write> {
    match format {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    }
}

// ---------------------------------------------------------------------------
// Shared steps
// ---------------------------------------------------------------------------

/// Load the alarm list. Any error aborts before a backend is constructed.
pub fn load_alarms(opts: &RunOptions, console: &mut Console<'_>) -> Result<LoadedAlarmList> {
    console.line(format_args!(
        "Loading CloudWatch alarms from {}...",
        opts.file.display()
    ));

    let loaded = cwp_config::load_alarm_list(&opts.file)
        .with_context(|| format!("alarm list could not be loaded from {}", opts.file.display()))?;

    if !loaded.key_present {
        tracing::warn!(
            file = %opts.file.display(),
            "`{}` is missing or empty; nothing will be checked",
            ALARM_LIST_KEY
        );
    }
    for p in loaded.unused_keys.iter().take(50) {
        tracing::warn!(pointer = %p, "unused key in alarm file");
    }
    let extra = loaded.unused_keys.len().saturating_sub(50);
    if extra > 0 {
        tracing::warn!("... and {} more unused key(s)", extra);
    }

    console.line(format_args!("Found {} CloudWatch alarm(s)", loaded.alarms.len()));
    console.line(format_args!("alarm_list_hash={}", loaded.list_hash));
    Ok(loaded)
}

/// Resolve the target and build the CloudWatch backend. Credential errors
/// are fatal.
pub async fn connect_backend(opts: &RunOptions) -> Result<CloudWatchBackend> {
    let target = TargetConfig::resolve(&opts.environment, &opts.region);
    if target.fell_back() {
        tracing::warn!(
            environment = %target.environment,
            profile = %target.profile,
            "unknown environment; using default profile"
        );
    }

    CloudWatchBackend::connect(&target)
        .await
        .context("failed to create CloudWatch client")
}

/// REPORT phase output in the selected format.
pub fn emit_report(
    report: &SweepReport,
    ctx: &RunContext,
    loaded: &LoadedAlarmList,
    console: &mut Console<'_>,
) -> Result<()> {
    tracing::info!(
        outcome = report.outcome.as_str(),
        checked = report.checked,
        deleted = report.deleted.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "sweep finished"
    );

    match ctx.format {
        OutputFormat::Text => render_text(report, console),
        OutputFormat::Json => {
            let meta = RunMeta {
                run_id: ctx.run_id,
                started_at: ctx.started_at,
                finished_at: Utc::now(),
                alarm_list_hash: loaded.list_hash.clone(),
            };
            let v = render_json(report, &meta).context("report json serialize failed")?;
            let s = serde_json::to_string_pretty(&v).context("report json serialize failed")?;
            println!("{s}");
        }
    }
    Ok(())
}
