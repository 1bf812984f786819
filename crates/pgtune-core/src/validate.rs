//! Validation of raw request parameters into a [`TuningInput`].
//!
//! Query strings arrive as text. [`parse_params`] parses each known field,
//! applies defaults, checks bounds, and reports every failing field at
//! once. Front ends that already hold typed values (the CLI) call
//! [`TuningInput::validate`] for the bound checks alone.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use crate::input::{BackupMethod, DEFAULT_VERSION, Os, StorageKind, TuningInput, Workload};

pub const MIN_VERSION: u32 = 10;
pub const MAX_VERSION: u32 = 18;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct FieldIssue {
    #[cfg_attr(feature = "api", schema(value_type = String))]
    pub field: &'static str,
    #[cfg_attr(feature = "api", schema(value_type = String))]
    pub message: &'static str,
}

/// All fields rejected by validation, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct ValidationError {
    pub errors: Vec<FieldIssue>,
}

impl ValidationError {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldIssue { field, message });
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Message for `field`, if it was rejected.
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|i| i.field == field)
            .map(|i| i.message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid input:")?;
        for issue in &self.errors {
            write!(f, " {}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

mod msg {
    pub const VERSION_NAN: &str =
        "The version is not a number. Please only include the major version number.";
    pub const VERSION_MIN: &str = "The minimum supported version is 10.";
    pub const VERSION_MAX: &str = "The maximum supported version is 18.";
    pub const OS_REQUIRED: &str = "The OS is required.";
    pub const OS_ENUM: &str = "The OS must be one of linux, windows, or macos.";
    pub const MEMORY_REQUIRED: &str = "The memory size (in GB) is required.";
    pub const MEMORY_NAN: &str = "The memory size (in GB) must be a number.";
    pub const MEMORY_MIN: &str =
        "The minimum allowed memory is 1GB. PostgreSQL can run on less, but it's not recommended.";
    pub const CPUS_REQUIRED: &str = "The CPU count is required.";
    pub const CPUS_NAN: &str = "The CPU count must be a number.";
    pub const CPUS_MIN: &str = "The minimum allowed CPU is 1.";
    pub const STORAGE_REQUIRED: &str = "The storage type is required.";
    pub const STORAGE_ENUM: &str =
        "The storage type must be ssd, hdd, or network. NVMe is considered a type of ssd.";
    pub const WORKLOAD_REQUIRED: &str = "The workload type is required.";
    pub const WORKLOAD_ENUM: &str =
        "The workload must be one of webapp, oltp, warehouse, desktop, or mixed.";
    pub const MAX_CONN_NAN: &str = "The max connections must be a number.";
    pub const MAX_CONN_MIN: &str = "The minimum allowed connections is 10.";
    pub const DISKS_REQUIRED: &str = "The number of disks is required.";
    pub const DISKS_NAN: &str = "The number of disks must be a number.";
    pub const DISKS_MIN: &str = "The minimum allowed disks is 1.";
    pub const BACKUP_ENUM: &str =
        "The backup method must be one of pg_dump, pg_basebackup, or pglogical.";
    pub const REPLICAS_NAN: &str = "The number of replicas must be a number.";
    pub const REPLICAS_MIN: &str = "The minimum allowed replicas is 0.";
    pub const DB_SIZE_REQUIRED: &str = "The database size is required.";
    pub const DB_SIZE_NAN: &str = "The database size must be a number.";
    pub const DB_SIZE_MIN: &str = "The DB size must be at least 1GB";
}

impl TuningInput {
    /// Checks numeric bounds of an already typed input.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::default();

        if self.version < MIN_VERSION {
            err.push("version", msg::VERSION_MIN);
        } else if self.version > MAX_VERSION {
            err.push("version", msg::VERSION_MAX);
        }
        if !self.memory_gb.is_finite() {
            err.push("memory_gb", msg::MEMORY_NAN);
        } else if self.memory_gb < 1.0 {
            err.push("memory_gb", msg::MEMORY_MIN);
        }
        if self.cpus < 1 {
            err.push("cpus", msg::CPUS_MIN);
        }
        if self.max_conn.is_some_and(|n| n < 10) {
            err.push("max_conn", msg::MAX_CONN_MIN);
        }
        if self.num_disks < 1 {
            err.push("num_disks", msg::DISKS_MIN);
        }
        if !self.db_size_gb.is_finite() {
            err.push("db_size_gb", msg::DB_SIZE_NAN);
        } else if self.db_size_gb < 1.0 {
            err.push("db_size_gb", msg::DB_SIZE_MIN);
        }

        err.into_result()
    }
}

// ============================================================
// Raw parameter parsing
// ============================================================

/// Outcome of reading one raw field.
enum Field<T> {
    Missing,
    Invalid,
    Value(T),
}

fn read<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Field<T> {
    match params.get(key).map(|v| v.trim()) {
        None | Some("") => Field::Missing,
        Some(raw) => raw.parse().map_or(Field::Invalid, Field::Value),
    }
}

/// Reads a whole number that may be negative, so "-1" is reported as out of
/// range rather than as not-a-number.
fn read_int(params: &HashMap<String, String>, key: &str) -> Field<i64> {
    read(params, key)
}

fn read_gb(params: &HashMap<String, String>, key: &str) -> Field<f64> {
    match read::<f64>(params, key) {
        Field::Value(v) if !v.is_finite() => Field::Invalid,
        other => other,
    }
}

/// Builds a [`TuningInput`] from query parameters.
///
/// Unknown keys are ignored. `version`, `backup_method` and `num_replicas`
/// fall back to their defaults when absent.
pub fn parse_params(params: &HashMap<String, String>) -> Result<TuningInput, ValidationError> {
    let mut err = ValidationError::default();

    let version = match read_int(params, "version") {
        Field::Missing => DEFAULT_VERSION,
        Field::Invalid => {
            err.push("version", msg::VERSION_NAN);
            DEFAULT_VERSION
        }
        Field::Value(v) if v < i64::from(MIN_VERSION) => {
            err.push("version", msg::VERSION_MIN);
            DEFAULT_VERSION
        }
        Field::Value(v) if v > i64::from(MAX_VERSION) => {
            err.push("version", msg::VERSION_MAX);
            DEFAULT_VERSION
        }
        Field::Value(v) => v as u32,
    };

    let os = match read::<Os>(params, "os") {
        Field::Missing => {
            err.push("os", msg::OS_REQUIRED);
            None
        }
        Field::Invalid => {
            err.push("os", msg::OS_ENUM);
            None
        }
        Field::Value(v) => Some(v),
    };

    let memory_gb = match read_gb(params, "memory_gb") {
        Field::Missing => {
            err.push("memory_gb", msg::MEMORY_REQUIRED);
            None
        }
        Field::Invalid => {
            err.push("memory_gb", msg::MEMORY_NAN);
            None
        }
        Field::Value(v) if v < 1.0 => {
            err.push("memory_gb", msg::MEMORY_MIN);
            None
        }
        Field::Value(v) => Some(v),
    };

    let cpus = required_count(
        &mut err,
        params,
        "cpus",
        1,
        [msg::CPUS_REQUIRED, msg::CPUS_NAN, msg::CPUS_MIN],
    );

    let storage_type = match read::<StorageKind>(params, "storage_type") {
        Field::Missing => {
            err.push("storage_type", msg::STORAGE_REQUIRED);
            None
        }
        Field::Invalid => {
            err.push("storage_type", msg::STORAGE_ENUM);
            None
        }
        Field::Value(v) => Some(v),
    };

    let workload = match read::<Workload>(params, "workload") {
        Field::Missing => {
            err.push("workload", msg::WORKLOAD_REQUIRED);
            None
        }
        Field::Invalid => {
            err.push("workload", msg::WORKLOAD_ENUM);
            None
        }
        Field::Value(v) => Some(v),
    };

    let max_conn = match read_int(params, "max_conn") {
        Field::Missing => None,
        Field::Invalid => {
            err.push("max_conn", msg::MAX_CONN_NAN);
            None
        }
        Field::Value(v) if v < 10 => {
            err.push("max_conn", msg::MAX_CONN_MIN);
            None
        }
        Field::Value(v) => match u32::try_from(v) {
            Ok(v) => Some(v),
            Err(_) => {
                err.push("max_conn", msg::MAX_CONN_NAN);
                None
            }
        },
    };

    let num_disks = required_count(
        &mut err,
        params,
        "num_disks",
        1,
        [msg::DISKS_REQUIRED, msg::DISKS_NAN, msg::DISKS_MIN],
    );

    let backup_method = match read::<BackupMethod>(params, "backup_method") {
        Field::Missing => BackupMethod::default(),
        Field::Invalid => {
            err.push("backup_method", msg::BACKUP_ENUM);
            BackupMethod::default()
        }
        Field::Value(v) => v,
    };

    let num_replicas = match read_int(params, "num_replicas") {
        Field::Missing => 0,
        Field::Invalid => {
            err.push("num_replicas", msg::REPLICAS_NAN);
            0
        }
        Field::Value(v) if v < 0 => {
            err.push("num_replicas", msg::REPLICAS_MIN);
            0
        }
        Field::Value(v) => u32::try_from(v).unwrap_or_else(|_| {
            err.push("num_replicas", msg::REPLICAS_NAN);
            0
        }),
    };

    let db_size_gb = match read_gb(params, "db_size_gb") {
        Field::Missing => {
            err.push("db_size_gb", msg::DB_SIZE_REQUIRED);
            None
        }
        Field::Invalid => {
            err.push("db_size_gb", msg::DB_SIZE_NAN);
            None
        }
        Field::Value(v) if v < 1.0 => {
            err.push("db_size_gb", msg::DB_SIZE_MIN);
            None
        }
        Field::Value(v) => Some(v),
    };

    match (os, memory_gb, cpus, storage_type, workload, num_disks, db_size_gb) {
        (
            Some(os),
            Some(memory_gb),
            Some(cpus),
            Some(storage_type),
            Some(workload),
            Some(num_disks),
            Some(db_size_gb),
        ) if err.errors.is_empty() => Ok(TuningInput {
            version,
            os,
            memory_gb,
            cpus,
            storage_type,
            workload,
            max_conn,
            num_disks,
            backup_method,
            num_replicas,
            db_size_gb,
        }),
        _ => Err(err),
    }
}

/// Required positive count; `messages` are (missing, not a number, below min).
fn required_count(
    err: &mut ValidationError,
    params: &HashMap<String, String>,
    field: &'static str,
    min: i64,
    [missing, nan, below]: [&'static str; 3],
) -> Option<u32> {
    match read_int(params, field) {
        Field::Missing => {
            err.push(field, missing);
            None
        }
        Field::Invalid => {
            err.push(field, nan);
            None
        }
        Field::Value(v) if v < min => {
            err.push(field, below);
            None
        }
        Field::Value(v) => match u32::try_from(v) {
            Ok(v) => Some(v),
            Err(_) => {
                err.push(field, nan);
                None
            }
        },
    }
}
