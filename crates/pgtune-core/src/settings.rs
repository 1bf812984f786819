//! Settings table, warnings and the combined result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single recommended value.
///
/// Serialized untagged, so JSON carries plain numbers and strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Float(f64),
    /// Token (`"on"`, `"try"`), time (`"200ms"`) or size (`"16MB"`) string.
    Text(String),
}

impl SettingValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Integer(v)
    }
}

impl From<u32> for SettingValue {
    fn from(v: u32) -> Self {
        SettingValue::Integer(i64::from(v))
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Float(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Text(v)
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Integer(v) => write!(f, "{v}"),
            SettingValue::Float(v) => write!(f, "{v}"),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

/// Setting name → value, kept in name order so output is stable.
///
/// Built by layering: later `set`/`merge` calls overwrite earlier values.
/// Keys are never removed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct SettingsTable(BTreeMap<String, SettingValue>);

impl SettingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<SettingValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Overlays `other` on top of `self`; keys from `other` win.
    pub fn merge(&mut self, other: SettingsTable) {
        self.0.extend(other.0);
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for SettingsTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Advisory messages, in the order they were raised.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct WarningList(Vec<String>);

impl WarningList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` unless the exact same text is already present.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.0.contains(&message) {
            self.0.push(message);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Recommended settings together with the warnings raised for the input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct TuningResult {
    pub settings: SettingsTable,
    pub warnings: WarningList,
}

/// Hardware independent defaults every result starts from.
pub fn baseline() -> SettingsTable {
    [
        ("checkpoint_timeout", SettingValue::from("15min")),
        ("checkpoint_completion_target", 0.9f64.into()),
        ("wal_compression", "on".into()),
        ("wal_buffers", (-1i64).into()),
        ("wal_writer_delay", "200ms".into()),
        ("wal_writer_flush_after", "1MB".into()),
        ("shared_preload_libraries", "'pg_stat_statements'".into()),
        ("track_io_timing", "on".into()),
        ("track_functions", "pl".into()),
        ("max_worker_processes", 8i64.into()),
        ("max_parallel_workers_per_gather", 2i64.into()),
        ("max_parallel_workers", 8i64.into()),
        ("bgwriter_delay", "200ms".into()),
        ("bgwriter_lru_maxpages", 100i64.into()),
        ("bgwriter_lru_multiplier", 2.0f64.into()),
        ("bgwriter_flush_after", 0i64.into()),
        ("enable_partitionwise_join", "on".into()),
        ("enable_partitionwise_aggregate", "on".into()),
        ("jit", "on".into()),
        ("track_wal_io_timing", "on".into()),
        ("wal_recycle", "on".into()),
        ("max_slot_wal_keep_size", "1GB".into()),
    ]
    .into_iter()
    .collect()
}
