use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while loading the alarm list.
///
/// Every variant is fatal for a run: no partial list is ever handed to the
/// workflow.
#[derive(Debug)]
pub enum ConfigError {
    /// The alarm file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The document is not valid YAML.
    Yaml(String),
    /// The document root is not a mapping.
    NotAMapping,
    /// `cloudwatch_alarm_list` is present but is not a list of strings.
    InvalidAlarmList(String),
    /// An entry of the list is the empty string.
    EmptyAlarmName { index: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read alarm list {}: {source}", path.display())
            }
            ConfigError::Yaml(msg) => write!(f, "invalid yaml: {msg}"),
            ConfigError::NotAMapping => {
                write!(f, "alarm list document must be a mapping at the top level")
            }
            ConfigError::InvalidAlarmList(msg) => {
                write!(f, "cloudwatch_alarm_list must be a list of strings: {msg}")
            }
            ConfigError::EmptyAlarmName { index } => {
                write!(f, "cloudwatch_alarm_list[{index}] is empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
