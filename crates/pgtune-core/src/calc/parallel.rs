//! Parallel query worker counts.

use crate::input::Workload;
use crate::settings::SettingsTable;

/// Cap for per-gather and maintenance workers: gains beyond four workers
/// per operation are rarely measurable outside analytical workloads.
const WORKER_CAP: u32 = 4;

/// Worker settings for hosts with at least four CPUs; empty otherwise.
pub fn parallel_settings(version: u32, workload: Workload, cpus: u32) -> SettingsTable {
    let mut settings = SettingsTable::new();
    if cpus < 4 {
        return settings;
    }

    let mut workers_per_gather = cpus.div_ceil(2);
    if workload != Workload::Warehouse {
        workers_per_gather = workers_per_gather.min(WORKER_CAP);
    }

    settings.set("max_worker_processes", cpus);
    settings.set("max_parallel_workers_per_gather", workers_per_gather);

    if version >= 10 {
        settings.set("max_parallel_workers", cpus);
    }

    if version >= 11 {
        let maintenance_workers = if cpus > 2 { cpus / 2 } else { 1 };
        settings.set(
            "max_parallel_maintenance_workers",
            maintenance_workers.min(WORKER_CAP),
        );
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;

    fn int(t: &SettingsTable, key: &str) -> Option<i64> {
        t.get(key).and_then(SettingValue::as_i64)
    }

    #[test]
    fn test_small_hosts_get_nothing() {
        for cpus in 1..4 {
            assert!(parallel_settings(17, Workload::Warehouse, cpus).is_empty());
        }
    }

    #[test]
    fn test_four_cpus() {
        let t = parallel_settings(17, Workload::Webapp, 4);
        assert_eq!(int(&t, "max_worker_processes"), Some(4));
        assert_eq!(int(&t, "max_parallel_workers_per_gather"), Some(2));
        assert_eq!(int(&t, "max_parallel_workers"), Some(4));
        assert_eq!(int(&t, "max_parallel_maintenance_workers"), Some(2));
    }

    #[test]
    fn test_gather_cap_except_warehouse() {
        let web = parallel_settings(17, Workload::Webapp, 32);
        assert_eq!(int(&web, "max_parallel_workers_per_gather"), Some(4));

        let dw = parallel_settings(17, Workload::Warehouse, 32);
        assert_eq!(int(&dw, "max_parallel_workers_per_gather"), Some(16));
        assert_eq!(int(&dw, "max_parallel_maintenance_workers"), Some(4));
    }

    #[test]
    fn test_odd_cpu_count_rounds_up() {
        let t = parallel_settings(17, Workload::Warehouse, 5);
        assert_eq!(int(&t, "max_parallel_workers_per_gather"), Some(3));
        assert_eq!(int(&t, "max_parallel_maintenance_workers"), Some(2));
    }

    #[test]
    fn test_version_gates() {
        let v10 = parallel_settings(10, Workload::Oltp, 8);
        assert_eq!(int(&v10, "max_parallel_workers"), Some(8));
        assert!(!v10.contains("max_parallel_maintenance_workers"));

        let v9 = parallel_settings(9, Workload::Oltp, 8);
        assert_eq!(v9.len(), 2);
        assert!(!v9.contains("max_parallel_workers"));
    }
}
