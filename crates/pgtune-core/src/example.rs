//! Documented example response, used as the OpenAPI example for
//! `GET /api/v1/tune`.
//!
//! Shows every key the service can return, including the optional
//! replication and desktop keys, so it is not the output of any single input.

use crate::checks::HIGH_MEMORY_WARNING;
use crate::settings::{SettingValue, SettingsTable, TuningResult, WarningList, baseline};

pub fn example_result() -> TuningResult {
    let mut settings = baseline();
    let overlay: SettingsTable = [
        ("archive_mode", SettingValue::from("on")),
        ("archive_command", "/bin/true".into()),
        ("min_wal_size", "1GB".into()),
        ("max_wal_size", "4GB".into()),
        ("max_parallel_maintenance_workers", 2i64.into()),
        ("wal_level", "minimal".into()),
        ("max_wal_senders", 0i64.into()),
        ("max_connections", 100i64.into()),
        ("superuser_reserved_connections", 3i64.into()),
        ("shared_buffers", "1GB".into()),
        ("effective_cache_size", "3GB".into()),
        ("maintenance_work_mem", "256MB".into()),
        ("huge_pages", "try".into()),
        ("default_statistics_target", 100i64.into()),
        ("random_page_cost", 1.1f64.into()),
        ("wal_keep_size", "3GB".into()),
        ("effective_io_concurrency", 200i64.into()),
        ("work_mem", "16MB".into()),
    ]
    .into_iter()
    .collect();
    settings.merge(overlay);

    let mut warnings = WarningList::new();
    warnings.push(HIGH_MEMORY_WARNING);

    TuningResult { settings, warnings }
}

/// [`example_result`] as JSON, for schema annotations.
#[cfg(feature = "api")]
pub fn example_json() -> serde_json::Value {
    serde_json::to_value(example_result()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_covers_every_derived_key() {
        let example = example_result();
        let derived = crate::compose::derive_settings(&crate::input::TuningInput {
            num_replicas: 1,
            ..Default::default()
        })
        .unwrap();
        for (name, _) in derived.settings.iter() {
            assert!(example.settings.contains(name), "example lacks {name}");
        }
        assert_eq!(example.warnings.len(), 1);
    }
}
