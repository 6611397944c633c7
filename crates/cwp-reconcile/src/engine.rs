use cwp_config::{AlarmList, AlarmName};

use crate::console::Console;
use crate::prompt::{is_affirmative, ConfirmationPrompt};
use crate::{
    AlarmBackend, CheckOutcome, DeleteOutcome, FailedDeletion, GateDecision, SweepOutcome,
    SweepReport,
};

// ---------------------------------------------------------------------------
// CHECK
// ---------------------------------------------------------------------------

/// Query every listed alarm, in list order, and classify it.
///
/// A failed check is logged and the alarm is skipped: it is not counted as
/// missing and it is never deleted. Later names are still checked.
pub async fn check_phase<B>(
    alarms: &AlarmList,
    backend: &B,
    console: &mut Console<'_>,
) -> CheckOutcome
where
    B: AlarmBackend + ?Sized,
{
    let total = alarms.len();
    let mut outcome = CheckOutcome::default();

    tracing::info!(backend = backend.name(), alarms = total, "checking alarm existence");
    console.line(format_args!("====== Checking Alarm Existence ======"));

    for (i, alarm) in alarms.iter().enumerate() {
        console.partial(format_args!("[{}/{}] Checking alarm: {}... ", i + 1, total, alarm));

        let result = backend.alarm_exists(alarm).await;
        match &result {
            Ok(true) => console.line(format_args!("Exists")),
            Ok(false) => console.line(format_args!("Does not exist")),
            Err(e) => {
                tracing::warn!(alarm = %alarm, error = %e, "existence check failed; skipping");
                console.line(format_args!("ERROR: {e}"));
            }
        }
        outcome.record(alarm, result);
    }

    tracing::info!(
        existing = outcome.existing.len(),
        non_existent = outcome.non_existent.len(),
        skipped = outcome.skipped.len(),
        "existence check finished"
    );
    outcome
}

// ---------------------------------------------------------------------------
// GATE
// ---------------------------------------------------------------------------

pub fn confirmation_prompt_text(count: usize) -> String {
    format!("About to delete {count} alarm(s). Do you want to continue? (yes/no): ")
}

/// Block on one line of operator input. Only the exact affirmative tokens
/// proceed; anything else, including an unreadable answer, declines.
pub fn gate<P>(count: usize, prompt: &mut P, console: &mut Console<'_>) -> GateDecision
where
    P: ConfirmationPrompt + ?Sized,
{
    console.blank();
    console.line(format_args!("=== Deletion Confirmation ==="));

    let input = match prompt.read_confirmation(&confirmation_prompt_text(count)) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "could not read confirmation; treating as decline");
            String::new()
        }
    };

    if is_affirmative(&input) {
        tracing::info!(count, "deletion confirmed by operator");
        GateDecision::Proceed
    } else {
        tracing::info!(count, input = %input, "deletion declined by operator");
        GateDecision::Declined { input }
    }
}

// ---------------------------------------------------------------------------
// DELETE
// ---------------------------------------------------------------------------

/// Delete every alarm in `existing`, in order. A failure is recorded and the
/// next alarm is still attempted; nothing is retried.
pub async fn delete_phase<B>(
    existing: &[AlarmName],
    backend: &B,
    console: &mut Console<'_>,
) -> DeleteOutcome
where
    B: AlarmBackend + ?Sized,
{
    let total = existing.len();
    let mut outcome = DeleteOutcome::default();

    tracing::info!(backend = backend.name(), alarms = total, "deleting alarms");
    console.blank();
    console.line(format_args!("====== Deleting Alarms ======"));

    for (i, alarm) in existing.iter().enumerate() {
        console.partial(format_args!("[{}/{}] Deleting alarm: {}... ", i + 1, total, alarm));

        match backend.delete_alarm(alarm).await {
            Ok(()) => {
                console.line(format_args!("DELETED ✓"));
                outcome.deleted.push(alarm.clone());
            }
            Err(e) => {
                tracing::warn!(alarm = %alarm, error = %e, "delete failed");
                console.line(format_args!("FAILED ✗ ({e})"));
                outcome.failed.push(FailedDeletion {
                    alarm: alarm.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    outcome
}

// ---------------------------------------------------------------------------
// Full sweep
// ---------------------------------------------------------------------------

/// CHECK -> GATE -> DELETE, in that order, with no phase re-entry.
///
/// Early exits: an empty existing set ends the run without prompting, and a
/// declined gate ends it without any delete call.
pub async fn run_sweep<B, P>(
    alarms: &AlarmList,
    backend: &B,
    prompt: &mut P,
    console: &mut Console<'_>,
) -> SweepReport
where
    B: AlarmBackend + ?Sized,
    P: ConfirmationPrompt + ?Sized,
{
    let check = check_phase(alarms, backend, console).await;

    if check.existing.is_empty() {
        return SweepReport::from_check(SweepOutcome::NothingToDelete, check);
    }

    match gate(check.existing.len(), prompt, console) {
        GateDecision::Declined { .. } => SweepReport::from_check(SweepOutcome::Cancelled, check),
        GateDecision::Proceed => {
            let delete = delete_phase(&check.existing, backend, console).await;
            SweepReport::completed(check, delete)
        }
    }
}

/// CHECK only. Never prompts and never deletes.
pub async fn run_check_only<B>(
    alarms: &AlarmList,
    backend: &B,
    console: &mut Console<'_>,
) -> SweepReport
where
    B: AlarmBackend + ?Sized,
{
    let check = check_phase(alarms, backend, console).await;
    SweepReport::from_check(SweepOutcome::CheckOnly, check)
}
