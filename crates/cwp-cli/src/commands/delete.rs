//! `cwp delete`: CHECK -> GATE -> DELETE -> REPORT.

use std::process::ExitCode;

use anyhow::Result;
use cwp_reconcile::{run_sweep, Console, LinePrompt, SweepOutcome, SweepReport};
use tracing::Instrument;

use super::{connect_backend, emit_report, load_alarms, progress_writer, RunContext, RunOptions};

/// Exit status for `--strict` runs with at least one failed deletion.
const EXIT_PARTIAL_FAILURE: u8 = 2;

pub async fn run_delete(opts: RunOptions, strict: bool) -> Result<ExitCode> {
    let ctx = RunContext::new(opts.format);
    let span = ctx.span();

    let mut out = progress_writer(opts.format);
    let mut console = Console::new(&mut *out);

    let loaded = load_alarms(&opts, &mut console)?;

    let report = if loaded.alarms.is_empty() {
        // Nothing to check; the backend is never contacted.
        SweepReport::empty()
    } else {
        let backend = connect_backend(&opts).instrument(span.clone()).await?;

        // Prompt text goes wherever progress goes so it stays next to the
        // alarm count it refers to.
        let mut prompt = LinePrompt::new(std::io::stdin().lock(), progress_writer(opts.format));

        run_sweep(&loaded.alarms, &backend, &mut prompt, &mut console)
            .instrument(span)
            .await
    };

    emit_report(&report, &ctx, &loaded, &mut console)?;

    if strict && report.outcome == SweepOutcome::Completed && report.has_failures() {
        return Ok(ExitCode::from(EXIT_PARTIAL_FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}
