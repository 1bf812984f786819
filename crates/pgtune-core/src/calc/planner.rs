//! Planner and I/O hints.

use crate::input::{Os, StorageKind, Workload};

pub fn random_page_cost(storage: StorageKind) -> f64 {
    match storage {
        StorageKind::Hdd => 4.0,
        StorageKind::Ssd | StorageKind::Network => 1.1,
    }
}

/// Concurrent I/O requests per disk pair. Only meaningful on Linux, where
/// the server can issue posix_fadvise prefetches; `None` elsewhere.
pub fn effective_io_concurrency(os: Os, storage: StorageKind, num_disks: u32) -> Option<u32> {
    if os != Os::Linux {
        return None;
    }
    let per_disk: u32 = match storage {
        StorageKind::Ssd => 200,
        StorageKind::Hdd => 2,
        StorageKind::Network => 300,
    };
    let spindles = if num_disks > 1 {
        num_disks.div_ceil(2)
    } else {
        1
    };
    Some(per_disk.saturating_mul(spindles))
}

pub fn default_statistics_target(workload: Workload) -> u32 {
    match workload {
        Workload::Warehouse => 500,
        _ => 100,
    }
}
