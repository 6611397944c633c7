//! Scripted collaborators for exercising the sweep without AWS or a terminal.
//!
//! - [`ScriptedBackend`]: in-memory alarm store with per-name check/delete
//!   failures and a call log.
//! - [`ScriptedPrompt`]: replays canned operator answers and records every
//!   prompt it was shown.
//! - [`run_scripted_sweep`]: runs the full workflow and captures console output.

use std::collections::{BTreeSet, VecDeque};
use std::io;
use std::sync::{Mutex, MutexGuard};

use cwp_config::{AlarmList, AlarmName};
use cwp_reconcile::{
    run_check_only, run_sweep, AlarmBackend, BackendError, BackendOperation, ConfirmationPrompt,
    Console, SweepReport,
};

/// One backend call, as observed by [`ScriptedBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    Exists(String),
    Delete(String),
}

#[derive(Debug, Default)]
struct BackendState {
    alarms: BTreeSet<String>,
    calls: Vec<BackendCall>,
}

/// Deterministic in-memory backend.
///
/// A successful delete removes the alarm, so a second check of the same
/// name reports it missing. Deleting an absent alarm succeeds.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    state: Mutex<BackendState>,
    check_failures: BTreeSet<String>,
    delete_failures: BTreeSet<String>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alarms that exist at the start of the run.
    pub fn with_alarms<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().alarms.extend(names.into_iter().map(Into::into));
        self
    }

    /// Names whose existence check returns a request error.
    pub fn failing_check<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_failures.extend(names.into_iter().map(Into::into));
        self
    }

    /// Names whose delete call returns a request error.
    pub fn failing_delete<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delete_failures.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::Delete(n) => Some(n.clone()),
                BackendCall::Exists(_) => None,
            })
            .collect()
    }

    pub fn exists_calls(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::Exists(n) => Some(n.clone()),
                BackendCall::Delete(_) => None,
            })
            .collect()
    }

    /// Alarms still present in the store.
    pub fn remaining(&self) -> Vec<String> {
        self.lock().alarms.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        // A panicking test thread must not hide the call log from the others.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl AlarmBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn alarm_exists(&self, alarm: &AlarmName) -> Result<bool, BackendError> {
        let mut st = self.lock();
        st.calls.push(BackendCall::Exists(alarm.to_string()));
        if self.check_failures.contains(alarm.as_str()) {
            return Err(BackendError::request(
                BackendOperation::DescribeAlarms,
                alarm,
                "scripted check failure",
            ));
        }
        Ok(st.alarms.contains(alarm.as_str()))
    }

    async fn delete_alarm(&self, alarm: &AlarmName) -> Result<(), BackendError> {
        let mut st = self.lock();
        st.calls.push(BackendCall::Delete(alarm.to_string()));
        if self.delete_failures.contains(alarm.as_str()) {
            return Err(BackendError::request(
                BackendOperation::DeleteAlarms,
                alarm,
                "scripted delete failure",
            ));
        }
        st.alarms.remove(alarm.as_str());
        Ok(())
    }
}

/// Replays canned answers. Running out of answers reads as end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    fail_reads: bool,
    shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answers: VecDeque::from([answer.into()]),
            ..Self::default()
        }
    }

    /// A prompt whose every read fails with an I/O error.
    pub fn broken() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Every prompt text this prompt was asked to show.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn read_confirmation(&mut self, prompt: &str) -> io::Result<String> {
        self.shown.push(prompt.to_string());
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted read failure"));
        }
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

/// Build an alarm list from literals.
///
/// # Panics
/// On empty names; test input is expected to be valid.
pub fn alarm_list(names: &[&str]) -> AlarmList {
    match AlarmList::from_names(names.iter().copied()) {
        Ok(list) => list,
        Err(e) => panic!("invalid test alarm list: {e}"),
    }
}

/// Console output plus the report of one scripted run.
pub struct ScriptedRun {
    pub report: SweepReport,
    pub output: String,
}

pub async fn run_scripted_sweep(
    alarms: &AlarmList,
    backend: &ScriptedBackend,
    prompt: &mut ScriptedPrompt,
) -> ScriptedRun {
    let mut buf: Vec<u8> = Vec::new();
    let report = {
        let mut console = Console::new(&mut buf);
        run_sweep(alarms, backend, prompt, &mut console).await
    };
    ScriptedRun {
        report,
        output: String::from_utf8_lossy(&buf).into_owned(),
    }
}

pub async fn run_scripted_check(alarms: &AlarmList, backend: &ScriptedBackend) -> ScriptedRun {
    let mut buf: Vec<u8> = Vec::new();
    let report = {
        let mut console = Console::new(&mut buf);
        run_check_only(alarms, backend, &mut console).await
    };
    ScriptedRun {
        report,
        output: String::from_utf8_lossy(&buf).into_owned(),
    }
}
