//! cwp-config
//!
//! Loads the alarm list the sweep works from and resolves the AWS target
//! (profile + region) a run is scoped to.
//!
//! File format:
//!
//! ```yaml
//! cloudwatch_alarm_list:
//!   - my-service-cpu-high
//!   - my-service-5xx
//! ```
//!
//! The list is loaded once, validated, and never mutated afterwards.

mod consumption;
mod error;
mod target;

pub use consumption::{unused_leaf_pointers, CONSUMED_POINTERS};
pub use error::ConfigError;
pub use target::{TargetConfig, DEFAULT_PROFILE, DEFAULT_REGION, KNOWN_ENVIRONMENTS};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;

/// Default alarm file, relative to the working directory.
pub const DEFAULT_ALARM_FILE: &str = "cloudwatch-alarms.yaml";

/// The only key the loader reads.
pub const ALARM_LIST_KEY: &str = "cloudwatch_alarm_list";

/// A non-empty CloudWatch alarm name. Stored verbatim (no trimming); the
/// backend is the only judge of whether a name is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AlarmName(String);

impl AlarmName {
    /// Returns `None` for the empty string.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlarmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AlarmName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered alarm names as listed in the file. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AlarmList(Vec<AlarmName>);

impl AlarmList {
    /// Build a list from raw strings, rejecting empty entries.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(index, n)| AlarmName::new(n).ok_or(ConfigError::EmptyAlarmName { index }))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlarmName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a AlarmList {
    type Item = &'a AlarmName;
    type IntoIter = std::slice::Iter<'a, AlarmName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone)]
pub struct LoadedAlarmList {
    pub alarms: AlarmList,
    /// Hex SHA-256 of the canonical JSON array of names, in list order.
    pub list_hash: String,
    /// Leaf pointers the loader ignored (see [`unused_leaf_pointers`]).
    pub unused_keys: Vec<String>,
    /// False when `cloudwatch_alarm_list` was absent or null.
    pub key_present: bool,
}

/// Typed view of the one key the loader reads. Scalars in the list are
/// taken as their source text, so `2024` or `true` stay alarm names.
#[derive(Debug, Default, Deserialize)]
struct AlarmFile {
    #[serde(default)]
    cloudwatch_alarm_list: Option<Vec<String>>,
}

/// Read and parse the alarm file at `path`.
pub fn load_alarm_list(path: impl AsRef<Path>) -> Result<LoadedAlarmList, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = load_alarm_list_from_str(&raw)?;
    tracing::debug!(
        path = %path.display(),
        alarms = loaded.alarms.len(),
        list_hash = %loaded.list_hash,
        "alarm list loaded"
    );
    Ok(loaded)
}

pub fn load_alarm_list_from_str(raw: &str) -> Result<LoadedAlarmList, ConfigError> {
    let doc = parse_yaml_as_json(raw)?;

    let map = match &doc {
        Value::Null => serde_json::Map::new(),
        Value::Object(map) => map.clone(),
        _ => return Err(ConfigError::NotAMapping),
    };

    let unused_keys = unused_leaf_pointers(&Value::Object(map.clone()));

    let file: AlarmFile = if map.is_empty() {
        AlarmFile::default()
    } else {
        serde_yaml::from_str(raw).map_err(|e| ConfigError::InvalidAlarmList(e.to_string()))?
    };
    let key_present = file.cloudwatch_alarm_list.is_some();
    let names = file.cloudwatch_alarm_list.unwrap_or_default();

    let alarms = AlarmList::from_names(names)?;
    let list_hash = list_hash(&alarms)?;

    Ok(LoadedAlarmList {
        alarms,
        list_hash,
        unused_keys,
        key_present,
    })
}

fn parse_yaml_as_json(raw: &str) -> Result<Value, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    let v_yaml: serde_yaml::Value =
        serde_yaml::from_str(raw).map_err(|e| ConfigError::Yaml(e.to_string()))?;
    serde_json::to_value(v_yaml)
        .map_err(|e| ConfigError::Yaml(format!("yaml->json conversion failed: {e}")))
}

fn list_hash(alarms: &AlarmList) -> Result<String, ConfigError> {
    let canonical =
        serde_json::to_string(alarms).map_err(|e| ConfigError::InvalidAlarmList(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm_name_rejects_only_empty() {
        assert!(AlarmName::new("").is_none());
        assert_eq!(AlarmName::new("  \t").unwrap().as_str(), "  \t");
        assert_eq!(AlarmName::new(" a ").unwrap().as_str(), " a ");
    }

    #[test]
    fn from_names_reports_index_of_empty_entry() {
        let err = AlarmList::from_names(["a", "", "c"]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAlarmName { index: 1 }));
    }

    #[test]
    fn hash_depends_on_order() {
        let a = load_alarm_list_from_str("cloudwatch_alarm_list: [a, b]").unwrap();
        let b = load_alarm_list_from_str("cloudwatch_alarm_list: [b, a]").unwrap();
        assert_ne!(a.list_hash, b.list_hash);
        assert_eq!(a.list_hash.len(), 64);
    }
}
