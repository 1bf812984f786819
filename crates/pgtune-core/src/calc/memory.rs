//! Memory sizing: shared_buffers, effective_cache_size, maintenance_work_mem,
//! huge_pages and work_mem.

use crate::input::{Os, Workload};
use crate::settings::{SettingsTable, baseline};
use crate::units::{GB, SizeKb, SizeParseError, format_size, gib_to_kb, mb, parse_size};

/// Windows builds before 10 can't use more than this for shared_buffers.
const WINDOWS_SHARED_BUFFERS_LIMIT: SizeKb = mb(512);

const MAINTENANCE_WORK_MEM_LIMIT: SizeKb = 2 * GB;

/// Smallest work_mem ever recommended, in kB.
const WORK_MEM_MIN: SizeKb = 64;

const HUGE_PAGES_THRESHOLD: SizeKb = 32 * GB;

// ============================================================
// shared_buffers / effective_cache_size
// ============================================================

pub fn shared_buffers(memory_gb: f64, workload: Workload, os: Os, version: u32) -> String {
    let kbytes = gib_to_kb(memory_gb);
    let mut shared_buffers = if workload.is_server() {
        kbytes / 4
    } else {
        kbytes / 16
    };

    if version < 10 && os == Os::Windows {
        shared_buffers = shared_buffers.min(WINDOWS_SHARED_BUFFERS_LIMIT);
    }

    format_size(shared_buffers)
}

pub fn effective_cache_size(memory_gb: f64, workload: Workload) -> String {
    let kbytes = gib_to_kb(memory_gb);
    if workload.is_server() {
        // floor(3/4 of kbytes) without the intermediate product
        format_size(kbytes - kbytes.div_ceil(4))
    } else {
        format_size(kbytes / 4)
    }
}

// ============================================================
// maintenance_work_mem
// ============================================================

/// Memory for VACUUM, CREATE INDEX and friends.
///
/// Starts from a share of RAM, takes one step down for busy servers (or one
/// step up for very few connections) and is capped at 2 GiB.
pub fn maintenance_work_mem(memory_gb: f64, workload: Workload, os: Os, max_conn: u32) -> String {
    let kbytes = gib_to_kb(memory_gb);
    let mut mem = match workload {
        Workload::Warehouse => kbytes / 8,
        Workload::Webapp | Workload::Oltp | Workload::Desktop | Workload::Mixed => kbytes / 16,
    };

    if max_conn > 3000 && mem > mb(500) {
        mem -= mb(300);
    } else if max_conn > 200 && mem > mb(300) {
        mem -= mb(200);
    } else if max_conn > 100 && mem > mb(200) {
        mem -= mb(100);
    } else if max_conn < 20 {
        mem += mb(100);
    }

    if mem >= MAINTENANCE_WORK_MEM_LIMIT {
        // Windows rejects exactly 2048MB.
        mem = if os == Os::Windows {
            MAINTENANCE_WORK_MEM_LIMIT - mb(1)
        } else {
            MAINTENANCE_WORK_MEM_LIMIT
        };
    }

    format_size(mem)
}

pub fn huge_pages(memory_gb: f64) -> &'static str {
    if gib_to_kb(memory_gb) >= HUGE_PAGES_THRESHOLD {
        "try"
    } else {
        "off"
    }
}

// ============================================================
// work_mem
// ============================================================

/// Worker processes that may hold work_mem next to the client backends.
///
/// Taken from the parallel settings when they set a positive count, else
/// from the baseline table, else 1.
fn worker_processes(parallel: &SettingsTable) -> u64 {
    let positive = |t: &SettingsTable| {
        t.get("max_worker_processes")
            .and_then(|v| v.as_i64())
            .filter(|&n| n > 0)
            .map(|n| n as u64)
    };
    positive(parallel)
        .or_else(|| positive(&baseline()))
        .unwrap_or(1)
}

/// Per-operation sort/hash memory.
///
/// RAM left after shared_buffers is split across every backend and worker,
/// assuming each runs about three such operations at once, then scaled down
/// for workloads that tend to run several big operations per query.
pub fn work_mem(
    memory_gb: f64,
    shared_buffers: &str,
    max_conn: u32,
    parallel: &SettingsTable,
    workload: Workload,
) -> Result<String, SizeParseError> {
    let kbytes = gib_to_kb(memory_gb);
    let shared = parse_size(shared_buffers)?;
    let backends = u64::from(max_conn) + worker_processes(parallel);

    let available = kbytes.saturating_sub(shared) as f64 / (backends * 3) as f64;
    let work_mem = match workload {
        Workload::Webapp | Workload::Oltp => available,
        Workload::Desktop => available / 6.0,
        Workload::Warehouse | Workload::Mixed => available / 2.0,
    }
    .floor() as SizeKb;

    Ok(format_size(work_mem.max(WORK_MEM_MIN)))
}
