//! Typed description of the host and workload being tuned.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system PostgreSQL runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Windows,
    Macos,
}

/// Kind of storage holding the data directory. NVMe counts as `Ssd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Ssd,
    Hdd,
    Network,
}

/// Workload category the instance serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    /// Web application: many short queries, mostly reads.
    Webapp,
    /// Online transaction processing: write heavy, many connections.
    Oltp,
    /// Data warehouse: few connections, large analytical queries.
    Warehouse,
    /// Developer workstation sharing the machine with other programs.
    Desktop,
    Mixed,
}

impl Workload {
    /// Dedicated server workloads, i.e. everything but `Desktop`.
    pub fn is_server(self) -> bool {
        matches!(
            self,
            Workload::Webapp | Workload::Oltp | Workload::Warehouse | Workload::Mixed
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BackupMethod {
    #[default]
    PgDump,
    PgBasebackup,
    Pglogical,
}

/// Error returned by the `FromStr` impls when the text names no variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! str_enum {
    ($ty:ident, $kind:literal, { $($name:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Os, "os", {
    "linux" => Linux,
    "windows" => Windows,
    "macos" => Macos,
});

str_enum!(StorageKind, "storage type", {
    "ssd" => Ssd,
    "hdd" => Hdd,
    "network" => Network,
});

str_enum!(Workload, "workload", {
    "webapp" => Webapp,
    "oltp" => Oltp,
    "warehouse" => Warehouse,
    "desktop" => Desktop,
    "mixed" => Mixed,
});

str_enum!(BackupMethod, "backup method", {
    "pg_dump" => PgDump,
    "pg_basebackup" => PgBasebackup,
    "pglogical" => Pglogical,
});

/// Default PostgreSQL major version when none is given.
pub const DEFAULT_VERSION: u32 = 17;

/// Hardware and workload facts the settings are derived from.
///
/// Field names match the query parameters of `GET /api/v1/tune`.
/// Values are expected to have passed [`TuningInput::validate`]; the
/// calculators do not re-check bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct TuningInput {
    /// PostgreSQL major version (10..=18).
    pub version: u32,
    pub os: Os,
    /// Total RAM in GiB.
    pub memory_gb: f64,
    pub cpus: u32,
    pub storage_type: StorageKind,
    pub workload: Workload,
    /// Explicit `max_connections`; derived from the workload when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_conn: Option<u32>,
    pub num_disks: u32,
    #[serde(default)]
    pub backup_method: BackupMethod,
    #[serde(default)]
    pub num_replicas: u32,
    /// Expected database size in GiB.
    pub db_size_gb: f64,
}

impl Default for TuningInput {
    /// Defaults for an unspecified request: a small linux web server.
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            os: Os::Linux,
            memory_gb: 8.0,
            cpus: 8,
            storage_type: StorageKind::Ssd,
            workload: Workload::Webapp,
            max_conn: None,
            num_disks: 1,
            backup_method: BackupMethod::PgDump,
            num_replicas: 0,
            db_size_gb: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_workloads() {
        assert!(Workload::Webapp.is_server());
        assert!(Workload::Oltp.is_server());
        assert!(Workload::Warehouse.is_server());
        assert!(Workload::Mixed.is_server());
        assert!(!Workload::Desktop.is_server());
    }

    #[test]
    fn test_from_str_round_trip() {
        for w in Workload::ALL {
            assert_eq!(w.as_str().parse::<Workload>(), Ok(*w));
        }
        for b in BackupMethod::ALL {
            assert_eq!(b.to_string().parse::<BackupMethod>(), Ok(*b));
        }
        assert_eq!("network".parse::<StorageKind>(), Ok(StorageKind::Network));
        assert_eq!("macos".parse::<Os>(), Ok(Os::Macos));
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        let err = "Linux".parse::<Os>().unwrap_err();
        assert_eq!(err.kind, "os");
        assert_eq!(err.to_string(), "unknown os 'Linux'");
        assert!("nvme".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_serde_names_match_query_params() {
        let json = serde_json::to_value(TuningInput::default()).unwrap();
        assert_eq!(json["os"], "linux");
        assert_eq!(json["storage_type"], "ssd");
        assert_eq!(json["backup_method"], "pg_dump");
        assert!(json.get("max_conn").is_none());
    }
}
