//! Composition of the per-concern calculators into one result.
//!
//! The order of steps matters: `maintenance_work_mem` reads the final
//! `max_connections`, `work_mem` reads `shared_buffers`, `max_connections`
//! and the parallel settings, `wal_buffers` reads `shared_buffers`. The group
//! merges at the end run last so they override anything set before them
//! (e.g. `wal_level` forces `max_wal_senders` to 0 for desktops).

use tracing::debug;

use crate::calc;
use crate::checks;
use crate::input::TuningInput;
use crate::settings::{SettingsTable, TuningResult, baseline};
use crate::units::SizeParseError;

/// Derives the recommended settings and warnings for `input`.
///
/// `input` must already be validated. The only error is a size string the
/// converter produced itself failing to parse back, which indicates a bug
/// rather than bad input.
pub fn derive_settings(input: &TuningInput) -> Result<TuningResult, SizeParseError> {
    let mut settings = baseline();

    let max_conn = input
        .max_conn
        .unwrap_or_else(|| calc::max_connections(input.workload));
    settings.set("max_connections", max_conn);
    settings.set(
        "superuser_reserved_connections",
        calc::superuser_reserved_connections(input.workload),
    );

    let shared_buffers = calc::shared_buffers(
        input.memory_gb,
        input.workload,
        input.os,
        input.version,
    );
    settings.set("shared_buffers", shared_buffers.as_str());
    settings.set(
        "effective_cache_size",
        calc::effective_cache_size(input.memory_gb, input.workload),
    );
    settings.set(
        "maintenance_work_mem",
        calc::maintenance_work_mem(input.memory_gb, input.workload, input.os, max_conn),
    );
    settings.set("huge_pages", calc::huge_pages(input.memory_gb));
    settings.set(
        "default_statistics_target",
        calc::default_statistics_target(input.workload),
    );
    settings.set("random_page_cost", calc::random_page_cost(input.storage_type));
    settings.set(
        "checkpoint_completion_target",
        calc::checkpoint_completion_target(),
    );
    settings.set("max_wal_senders", calc::wal_senders(input.num_replicas));
    settings.set("wal_keep_size", calc::wal_keep_size(input.db_size_gb));

    if let Some(io) =
        calc::effective_io_concurrency(input.os, input.storage_type, input.num_disks)
    {
        settings.set("effective_io_concurrency", io);
    }

    // Merged last, but work_mem needs the worker count now.
    let parallel = calc::parallel_settings(input.version, input.workload, input.cpus);

    settings.set(
        "work_mem",
        calc::work_mem(
            input.memory_gb,
            &shared_buffers,
            max_conn,
            &parallel,
            input.workload,
        )?,
    );
    settings.set(
        "wal_buffers",
        calc::wal_buffers(input.version, &shared_buffers)?,
    );

    settings.merge(parallel);
    settings.merge(calc::checkpoint_segments(input.workload));
    settings.merge(calc::archive_mode(input.num_replicas));
    settings.merge(calc::wal_level(input.workload));

    let warnings = checks::warnings(input);

    debug!(
        workload = %input.workload,
        memory_gb = input.memory_gb,
        cpus = input.cpus,
        settings = settings.len(),
        warnings = warnings.len(),
        "derived settings"
    );

    Ok(TuningResult { settings, warnings })
}
