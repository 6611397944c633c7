//! `cwp check`: existence report only.

use std::process::ExitCode;

use anyhow::Result;
use cwp_reconcile::{run_check_only, Console, SweepOutcome, SweepReport};
use tracing::Instrument;

use super::{connect_backend, emit_report, load_alarms, progress_writer, RunContext, RunOptions};

pub async fn run_check(opts: RunOptions) -> Result<ExitCode> {
    let ctx = RunContext::new(opts.format);
    let span = ctx.span();

    let mut out = progress_writer(opts.format);
    let mut console = Console::new(&mut *out);

    let loaded = load_alarms(&opts, &mut console)?;

    let report = if loaded.alarms.is_empty() {
        SweepReport {
            outcome: SweepOutcome::CheckOnly,
            ..SweepReport::empty()
        }
    } else {
        let backend = connect_backend(&opts).instrument(span.clone()).await?;
        run_check_only(&loaded.alarms, &backend, &mut console)
            .instrument(span)
            .await
    };

    emit_report(&report, &ctx, &loaded, &mut console)?;
    Ok(ExitCode::SUCCESS)
}
