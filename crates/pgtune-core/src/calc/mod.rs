//! Per-concern calculators.
//!
//! Each function derives one setting (or a small related group) from a few
//! input fields. Single settings are returned as plain values or rendered
//! size strings; groups are returned as partial [`SettingsTable`]s that the
//! composer merges.
//!
//! [`SettingsTable`]: crate::settings::SettingsTable

pub mod connections;
pub mod memory;
pub mod parallel;
pub mod planner;
pub mod wal;

pub use connections::{archive_mode, max_connections, superuser_reserved_connections, wal_senders};
pub use memory::{effective_cache_size, huge_pages, maintenance_work_mem, shared_buffers, work_mem};
pub use parallel::parallel_settings;
pub use planner::{default_statistics_target, effective_io_concurrency, random_page_cost};
pub use wal::{
    checkpoint_completion_target, checkpoint_segments, wal_buffers, wal_keep_size, wal_level,
};
