//! Monitoring backend boundary.
//!
//! This module defines only the capability the workflow needs (existence check
//! and delete) and its error type. Concrete backends live elsewhere
//! (`cwp-cloudwatch` for AWS, `cwp-testkit` for scripted fakes).

use cwp_config::AlarmName;
use std::fmt;

/// Which backend call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOperation {
    DescribeAlarms,
    DeleteAlarms,
}

impl BackendOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendOperation::DescribeAlarms => "DescribeAlarms",
            BackendOperation::DeleteAlarms => "DeleteAlarms",
        }
    }
}

/// Errors a [`AlarmBackend`] implementation may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// A single call for one alarm failed (network, throttling, auth, ...).
    /// Never implies that the alarm does not exist.
    Request {
        operation: BackendOperation,
        alarm: AlarmName,
        message: String,
    },
    /// The client could not be constructed: bad profile, region or credentials.
    Credentials(String),
}

impl BackendError {
    pub fn request(
        operation: BackendOperation,
        alarm: &AlarmName,
        message: impl Into<String>,
    ) -> Self {
        BackendError::Request {
            operation,
            alarm: alarm.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Request {
                operation,
                alarm,
                message,
            } => write!(f, "{} failed for alarm {}: {}", operation.as_str(), alarm, message),
            BackendError::Credentials(msg) => write!(f, "credential error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Alarm store contract used by the sweep.
///
/// Calls are awaited one at a time; implementations never see concurrent
/// requests from the workflow.
#[async_trait::async_trait]
pub trait AlarmBackend: Send + Sync {
    /// Short identifier used in logs (e.g. `"cloudwatch"`).
    fn name(&self) -> &'static str;

    /// True when the backend reports at least one metric or composite alarm
    /// with exactly this name.
    async fn alarm_exists(&self, alarm: &AlarmName) -> Result<bool, BackendError>;

    /// Request removal. Deleting an absent alarm is not an error.
    async fn delete_alarm(&self, alarm: &AlarmName) -> Result<(), BackendError>;
}
