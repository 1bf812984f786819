//! Connection limits and replication.

use crate::input::Workload;
use crate::settings::SettingsTable;

/// Used when the caller gives no explicit `max_conn`.
pub fn max_connections(workload: Workload) -> u32 {
    match workload {
        Workload::Webapp => 200,
        Workload::Oltp => 300,
        Workload::Warehouse => 40,
        Workload::Desktop => 20,
        Workload::Mixed => 100,
    }
}

pub fn superuser_reserved_connections(workload: Workload) -> u32 {
    match workload {
        Workload::Desktop => 1,
        _ => 3,
    }
}

/// WAL sender slots: ten covers up to seven replicas, one more per replica after that.
pub fn wal_senders(num_replicas: u32) -> u32 {
    match num_replicas {
        0 => 0,
        1..=7 => 10,
        n => (n - 7).saturating_add(10),
    }
}

pub fn archive_mode(num_replicas: u32) -> SettingsTable {
    let mut settings = SettingsTable::new();
    if num_replicas > 0 {
        settings.set("archive_mode", "on");
        settings.set("archive_command", "/bin/true");
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;

    #[test]
    fn test_max_connections_per_workload() {
        assert_eq!(max_connections(Workload::Webapp), 200);
        assert_eq!(max_connections(Workload::Oltp), 300);
        assert_eq!(max_connections(Workload::Warehouse), 40);
        assert_eq!(max_connections(Workload::Desktop), 20);
        assert_eq!(max_connections(Workload::Mixed), 100);
    }

    #[test]
    fn test_superuser_reserved() {
        assert_eq!(superuser_reserved_connections(Workload::Desktop), 1);
        assert_eq!(superuser_reserved_connections(Workload::Warehouse), 3);
    }

    #[test]
    fn test_wal_senders() {
        assert_eq!(wal_senders(0), 0);
        assert_eq!(wal_senders(1), 10);
        assert_eq!(wal_senders(5), 10);
        assert_eq!(wal_senders(7), 10);
        assert_eq!(wal_senders(8), 11);
        assert_eq!(wal_senders(15), 18);
        assert_eq!(wal_senders(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_archive_mode() {
        assert!(archive_mode(0).is_empty());
        let t = archive_mode(2);
        assert_eq!(t.get("archive_mode").and_then(SettingValue::as_str), Some("on"));
        assert_eq!(t.get("archive_command").and_then(SettingValue::as_str), Some("/bin/true"));
    }
}
