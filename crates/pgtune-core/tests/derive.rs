use std::collections::HashMap;

use pgtune_core::checks::HIGH_MEMORY_WARNING;
use pgtune_core::input::{StorageKind, Workload};
use pgtune_core::settings::SettingValue;
use pgtune_core::units::parse_size;
use pgtune_core::{TuningInput, derive_settings, parse_params, render_conf};

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn webapp_8gb() -> HashMap<String, String> {
    params(&[
        ("version", "17"),
        ("os", "linux"),
        ("memory_gb", "8"),
        ("cpus", "8"),
        ("storage_type", "ssd"),
        ("workload", "webapp"),
        ("num_disks", "1"),
        ("db_size_gb", "10"),
    ])
}

#[test]
fn test_webapp_8gb_end_to_end() {
    let input = parse_params(&webapp_8gb()).unwrap();
    let result = derive_settings(&input).unwrap();
    let s = &result.settings;

    let text = |k: &str| s.get(k).and_then(SettingValue::as_str).map(str::to_string);
    let int = |k: &str| s.get(k).and_then(SettingValue::as_i64);

    assert_eq!(int("max_connections"), Some(200));
    assert_eq!(text("shared_buffers").as_deref(), Some("2GB"));
    assert_eq!(text("effective_cache_size").as_deref(), Some("6GB"));
    assert_eq!(text("work_mem").as_deref(), Some("9MB"));
    assert_eq!(text("wal_buffers").as_deref(), Some("-1"));
    assert_eq!(int("max_wal_senders"), Some(0));
    assert_eq!(text("min_wal_size").as_deref(), Some("1GB"));
    assert_eq!(text("max_wal_size").as_deref(), Some("4GB"));
    assert_eq!(int("effective_io_concurrency"), Some(200));
    assert!(!s.contains("archive_mode"));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_high_memory_host_gets_one_warning() {
    let mut p = webapp_8gb();
    p.insert("memory_gb".into(), "300".into());
    let result = derive_settings(&parse_params(&p).unwrap()).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings.iter().next(), Some(HIGH_MEMORY_WARNING));
    assert_eq!(
        result.settings.get("huge_pages").and_then(SettingValue::as_str),
        Some("try")
    );
}

#[test]
fn test_derive_is_idempotent() {
    let input = TuningInput {
        memory_gb: 64.0,
        cpus: 32,
        num_replicas: 2,
        ..TuningInput::default()
    };
    let a = serde_json::to_string(&derive_settings(&input).unwrap()).unwrap();
    let b = serde_json::to_string(&derive_settings(&input).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invalid_request_reports_every_field() {
    let err = parse_params(&params(&[("version", "9"), ("memory_gb", "abc")])).unwrap_err();
    assert_eq!(
        err.message_for("version"),
        Some("The minimum supported version is 10.")
    );
    assert!(err.message_for("os").is_some());
    assert!(err.message_for("memory_gb").is_some());
    assert!(err.message_for("cpus").is_some());
    assert!(err.message_for("workload").is_some());
    assert!(err.message_for("db_size_gb").is_some());
}

#[test]
fn test_conf_output_is_sorted_and_quoted() {
    let input = TuningInput {
        num_replicas: 1,
        ..TuningInput::default()
    };
    let conf = render_conf(&derive_settings(&input).unwrap());
    let names: Vec<&str> = conf
        .lines()
        .filter_map(|l| l.split_once(" = ").map(|(k, _)| k))
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(conf.contains("archive_command = '/bin/true'\n"));
    assert!(conf.contains("shared_preload_libraries = 'pg_stat_statements'\n"));
}

fn is_size(text: &str) -> bool {
    ["kB", "MB", "GB", "TB"].iter().any(|u| text.ends_with(u))
}

#[test]
fn test_largest_accepted_inputs_derive_cleanly() {
    let max = u32::MAX.to_string();
    let max = max.as_str();
    for (memory, version, storage) in [
        ("1e13", "17", "network"),
        ("1e308", "13", "network"),
        ("1e308", "17", "ssd"),
    ] {
        let p = params(&[
            ("version", version),
            ("os", "linux"),
            ("memory_gb", memory),
            ("cpus", max),
            ("storage_type", storage),
            ("workload", "warehouse"),
            ("max_conn", max),
            ("num_disks", max),
            ("num_replicas", max),
            ("db_size_gb", "1e308"),
        ]);
        let input = parse_params(&p).unwrap();
        let result = derive_settings(&input).unwrap();

        for (name, value) in result.settings.iter() {
            if let Some(text) = value.as_str().filter(|t| is_size(t)) {
                assert!(parse_size(text).is_ok(), "{name} = {text}");
            }
        }
        assert_eq!(
            result.settings.get("max_wal_senders").and_then(SettingValue::as_i64),
            Some(i64::from(u32::MAX))
        );
        assert_eq!(result.warnings.len(), 1);
    }
}

#[test]
fn test_saturated_memory_every_workload() {
    for workload in [
        Workload::Webapp,
        Workload::Oltp,
        Workload::Warehouse,
        Workload::Desktop,
        Workload::Mixed,
    ] {
        let input = TuningInput {
            memory_gb: f64::MAX,
            db_size_gb: f64::MAX,
            storage_type: StorageKind::Hdd,
            num_disks: u32::MAX,
            workload,
            ..TuningInput::default()
        };
        assert!(input.validate().is_ok());
        let result = derive_settings(&input).unwrap();
        let cache = result
            .settings
            .get("effective_cache_size")
            .and_then(SettingValue::as_str)
            .unwrap();
        assert!(cache.ends_with("TB"), "{workload}: {cache}");
    }
}
