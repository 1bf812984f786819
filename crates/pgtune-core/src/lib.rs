//! pgtune-core - PostgreSQL settings advisor shared by the CLI and web service.
//!
//! Provides:
//! - `input` - hardware and workload description, enum vocabularies
//! - `validate` - raw parameter parsing, defaults and bound checks
//! - `units` - size strings (`2GB`, `64kB`) to and from kilobytes
//! - `calc` - per-concern calculators (memory, WAL, parallelism, connections, planner)
//! - `compose` - fixed-order composition into one settings table
//! - `checks` - warnings for inputs outside the calibrated range
//! - `settings` - setting values, tables, baseline defaults
//! - `render` - `postgresql.conf` text output
//! - `example` - documented example response
//!
//! With `api` feature:
//! - OpenAPI schemas (utoipa) on every public request and response type

pub mod calc;
pub mod checks;
pub mod compose;
pub mod example;
pub mod input;
pub mod render;
pub mod settings;
pub mod units;
pub mod validate;

pub use compose::derive_settings;
pub use input::TuningInput;
pub use render::render_conf;
pub use settings::TuningResult;
pub use validate::{ValidationError, parse_params};

/// Crate version with the git commit it was built from.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("PGTUNE_GIT_SHA"));
