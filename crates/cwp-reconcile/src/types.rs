use cwp_config::AlarmName;
use serde::Serialize;

use crate::BackendError;

/// An alarm whose existence check failed. It is neither existing nor
/// non-existent and is never deleted in this run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedCheck {
    pub alarm: AlarmName,
    pub error: String,
}

/// An alarm whose delete call failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedDeletion {
    pub alarm: AlarmName,
    pub error: String,
}

/// Result of the CHECK phase. The three buckets partition the input list
/// (as a multiset) and keep list order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub existing: Vec<AlarmName>,
    pub non_existent: Vec<AlarmName>,
    pub skipped: Vec<SkippedCheck>,
}

impl CheckOutcome {
    pub fn checked(&self) -> usize {
        self.existing.len() + self.non_existent.len() + self.skipped.len()
    }

    pub(crate) fn record(&mut self, alarm: &AlarmName, result: Result<bool, BackendError>) {
        match result {
            Ok(true) => self.existing.push(alarm.clone()),
            Ok(false) => self.non_existent.push(alarm.clone()),
            Err(e) => self.skipped.push(SkippedCheck {
                alarm: alarm.clone(),
                error: e.to_string(),
            }),
        }
    }
}

/// What the operator answered at the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Declined { input: String },
}

/// Result of the DELETE phase. `deleted` and `failed` partition the
/// existing set and keep its order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: Vec<AlarmName>,
    pub failed: Vec<FailedDeletion>,
}

/// How the run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepOutcome {
    /// CHECK found nothing to delete; no prompt was shown.
    NothingToDelete,
    /// The operator did not confirm; no delete call was made.
    Cancelled,
    /// DELETE ran over every existing alarm.
    Completed,
    /// Only CHECK was requested.
    CheckOnly,
}

impl SweepOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepOutcome::NothingToDelete => "NOTHING_TO_DELETE",
            SweepOutcome::Cancelled => "CANCELLED",
            SweepOutcome::Completed => "COMPLETED",
            SweepOutcome::CheckOnly => "CHECK_ONLY",
        }
    }
}

/// Full per-run report. All lists are in traversal order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub outcome: SweepOutcome,
    pub checked: usize,
    pub existing: Vec<AlarmName>,
    pub non_existent: Vec<AlarmName>,
    pub skipped: Vec<SkippedCheck>,
    pub deleted: Vec<AlarmName>,
    pub failed: Vec<FailedDeletion>,
}

impl SweepReport {
    /// Report for a run that never reached the backend (empty list).
    pub fn empty() -> Self {
        Self::from_check(SweepOutcome::NothingToDelete, CheckOutcome::default())
    }

    pub(crate) fn from_check(outcome: SweepOutcome, check: CheckOutcome) -> Self {
        Self {
            outcome,
            checked: check.checked(),
            existing: check.existing,
            non_existent: check.non_existent,
            skipped: check.skipped,
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub(crate) fn completed(check: CheckOutcome, delete: DeleteOutcome) -> Self {
        Self {
            deleted: delete.deleted,
            failed: delete.failed,
            ..Self::from_check(SweepOutcome::Completed, check)
        }
    }

    pub fn failed_names(&self) -> Vec<&AlarmName> {
        self.failed.iter().map(|f| &f.alarm).collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
