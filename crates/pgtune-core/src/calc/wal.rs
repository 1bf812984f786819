//! WAL and checkpoint sizing.

use crate::input::Workload;
use crate::settings::SettingsTable;
use crate::units::{SizeKb, SizeParseError, TB, format_size, gib_to_kb, mb, parse_size};

const WAL_BUFFERS_MAX: SizeKb = mb(16);
/// wal_buffers above this (and below the max) are rounded up to the max.
const WAL_BUFFERS_NEAR_MAX: SizeKb = mb(14);
const WAL_BUFFERS_MIN: SizeKb = 32;

/// WAL to retain for standbys, tiered by database size.
pub fn wal_keep_size(db_size_gb: f64) -> String {
    let kbytes = gib_to_kb(db_size_gb);
    let keep = if kbytes >= 10 * TB {
        mb(109_440)
    } else if kbytes >= TB {
        mb(22_080)
    } else {
        mb(3_650)
    };
    format_size(keep)
}

/// 3% of shared_buffers, at most 16MB, at least 32kB.
///
/// From 14 on the server sizes it itself and `-1` is returned.
pub fn wal_buffers(version: u32, shared_buffers: &str) -> Result<String, SizeParseError> {
    if version >= 14 {
        return Ok("-1".to_string());
    }

    let mut wal_buffers = 3 * parse_size(shared_buffers)? / 100;
    wal_buffers = wal_buffers.min(WAL_BUFFERS_MAX);

    // Common with shared_buffers clipped to 512MB on Windows: land on 16MB.
    if wal_buffers > WAL_BUFFERS_NEAR_MAX && wal_buffers < WAL_BUFFERS_MAX {
        wal_buffers = WAL_BUFFERS_MAX;
    }

    Ok(format_size(wal_buffers.max(WAL_BUFFERS_MIN)))
}

/// min_wal_size / max_wal_size for the workload.
pub fn checkpoint_segments(workload: Workload) -> SettingsTable {
    let (min_wal, max_wal) = match workload {
        Workload::Webapp | Workload::Mixed => (mb(1024), mb(4096)),
        Workload::Oltp => (mb(2048), mb(8192)),
        Workload::Warehouse => (mb(4096), mb(16384)),
        Workload::Desktop => (mb(100), mb(4096)),
    };
    [
        ("min_wal_size", format_size(min_wal)),
        ("max_wal_size", format_size(max_wal)),
    ]
    .into_iter()
    .collect()
}

pub fn checkpoint_completion_target() -> f64 {
    0.9
}

/// Desktop instances don't need replication WAL.
///
/// `wal_level = minimal` refuses to start with WAL senders configured, so
/// senders are forced to 0 alongside it.
pub fn wal_level(workload: Workload) -> SettingsTable {
    let mut settings = SettingsTable::new();
    if workload == Workload::Desktop {
        settings.set("wal_level", "minimal");
        settings.set("max_wal_senders", 0i64);
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;

    fn text(t: &SettingsTable, key: &str) -> String {
        t.get(key).and_then(SettingValue::as_str).unwrap_or_default().to_string()
    }

    #[test]
    fn test_wal_keep_size_tiers() {
        assert_eq!(wal_keep_size(10.0), "3GB");
        assert_eq!(wal_keep_size(1023.0), "3GB");
        assert_eq!(wal_keep_size(1024.0), "21GB");
        assert_eq!(wal_keep_size(10239.0), "21GB");
        assert_eq!(wal_keep_size(10240.0), "106GB");
    }

    #[test]
    fn test_wal_buffers_auto_from_14() {
        assert_eq!(wal_buffers(14, "2GB").unwrap(), "-1");
        assert_eq!(wal_buffers(18, "not even a size").unwrap(), "-1");
    }

    #[test]
    fn test_wal_buffers_three_percent() {
        // 3% of 256MB = 7864kB
        assert_eq!(wal_buffers(13, "256MB").unwrap(), "7MB");
    }

    #[test]
    fn test_wal_buffers_capped() {
        assert_eq!(wal_buffers(13, "2GB").unwrap(), "16MB");
    }

    #[test]
    fn test_wal_buffers_rounds_up_near_cap() {
        // 3% of 512MB = 15728kB, between 14MB and 16MB
        assert_eq!(wal_buffers(12, "512MB").unwrap(), "16MB");
    }

    #[test]
    fn test_wal_buffers_minimum() {
        assert_eq!(wal_buffers(10, "1MB").unwrap(), "32kB");
        assert_eq!(wal_buffers(10, "512kB").unwrap(), "32kB");
    }

    #[test]
    fn test_wal_buffers_malformed_shared_buffers() {
        assert!(wal_buffers(13, "2gb").is_err());
    }

    #[test]
    fn test_checkpoint_segments() {
        let cases = [
            (Workload::Webapp, "1GB", "4GB"),
            (Workload::Mixed, "1GB", "4GB"),
            (Workload::Oltp, "2GB", "8GB"),
            (Workload::Warehouse, "4GB", "16GB"),
            (Workload::Desktop, "100MB", "4GB"),
        ];
        for (workload, min_wal, max_wal) in cases {
            let t = checkpoint_segments(workload);
            assert_eq!(t.len(), 2);
            assert_eq!(text(&t, "min_wal_size"), min_wal, "{workload}");
            assert_eq!(text(&t, "max_wal_size"), max_wal, "{workload}");
        }
    }

    #[test]
    fn test_wal_level_only_for_desktop() {
        let desktop = wal_level(Workload::Desktop);
        assert_eq!(text(&desktop, "wal_level"), "minimal");
        assert_eq!(desktop.get("max_wal_senders").and_then(SettingValue::as_i64), Some(0));

        for w in [Workload::Webapp, Workload::Oltp, Workload::Warehouse, Workload::Mixed] {
            assert!(wal_level(w).is_empty(), "{w}");
        }
    }
}
