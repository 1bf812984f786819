use std::process;

use clap::{Parser, ValueEnum};
use tracing::{Level, debug, error};
use tracing_subscriber::EnvFilter;

use pgtune_core::input::{BackupMethod, DEFAULT_VERSION, Os, StorageKind, Workload};
use pgtune_core::{TuningInput, TuningResult, derive_settings, render_conf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON object with `settings` and `warnings`.
    Json,
    /// postgresql.conf fragment.
    Conf,
}

/// Recommends PostgreSQL settings for a host and workload.
#[derive(Parser)]
#[command(name = "pgtune", about = "PostgreSQL configuration advisor", version = pgtune_core::VERSION)]
struct Args {
    /// PostgreSQL major version (10-18).
    #[arg(long = "pg-version", default_value_t = DEFAULT_VERSION, env = "PGTUNE_PG_VERSION")]
    pg_version: u32,

    /// Operating system: linux, windows or macos.
    #[arg(long, default_value = "linux")]
    os: Os,

    /// Total RAM in GB.
    #[arg(long)]
    memory_gb: f64,

    /// Number of CPUs.
    #[arg(long)]
    cpus: u32,

    /// Storage type: ssd, hdd or network (NVMe is ssd).
    #[arg(long, default_value = "ssd")]
    storage_type: StorageKind,

    /// Workload: webapp, oltp, warehouse, desktop or mixed.
    #[arg(long, default_value = "webapp")]
    workload: Workload,

    /// Explicit max_connections. Derived from the workload when omitted.
    #[arg(long)]
    max_conn: Option<u32>,

    /// Number of data disks.
    #[arg(long, default_value = "1")]
    num_disks: u32,

    /// Backup method: pg_dump, pg_basebackup or pglogical.
    #[arg(long, default_value = "pg_dump")]
    backup_method: BackupMethod,

    /// Number of streaming replicas.
    #[arg(long, default_value = "0")]
    num_replicas: u32,

    /// Expected database size in GB.
    #[arg(long)]
    db_size_gb: f64,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Conf, env = "PGTUNE_FORMAT")]
    format: Format,

    /// Increase logging verbosity (-v for info, -vv for debug). Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn tuning_input(&self) -> TuningInput {
        TuningInput {
            version: self.pg_version,
            os: self.os,
            memory_gb: self.memory_gb,
            cpus: self.cpus,
            storage_type: self.storage_type,
            workload: self.workload,
            max_conn: self.max_conn,
            num_disks: self.num_disks,
            backup_method: self.backup_method,
            num_replicas: self.num_replicas,
            db_size_gb: self.db_size_gb,
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["pgtune", "pgtune_core"] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn render(result: &TuningResult, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Json => serde_json::to_string_pretty(result).map(|mut s| {
            s.push('\n');
            s
        }),
        Format::Conf => Ok(render_conf(result)),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let input = args.tuning_input();
    debug!(?input, "tuning input");

    if let Err(e) = input.validate() {
        for issue in &e.errors {
            eprintln!("{}: {}", issue.field, issue.message);
        }
        process::exit(2);
    }

    let result = match derive_settings(&input) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "settings derivation failed");
            process::exit(1);
        }
    };

    match render(&result, args.format) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            error!(error = %e, "failed to serialize result");
            process::exit(1);
        }
    }
}
