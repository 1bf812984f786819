//! HTTP request handlers.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::{debug, error};

use pgtune_core::validate::ValidationError;
use pgtune_core::{TuningResult, derive_settings, parse_params};

// ============================================================
// Health
// ============================================================

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
pub(crate) async fn handle_health() -> &'static str {
    "ok"
}

// ============================================================
// Tune
// ============================================================

/// Query parameters of `/api/v1/tune`, for the OpenAPI document only.
// The handler reads the raw map instead of `Query<TuneQuery>` so that every
// invalid field is reported, not just the first one serde trips over.
#[derive(utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct TuneQuery {
    /// PostgreSQL major version, 10 to 18. Defaults to 17.
    version: Option<u32>,
    /// linux, windows or macos.
    os: String,
    /// Total RAM in GB, at least 1.
    memory_gb: f64,
    /// CPU count, at least 1.
    cpus: u32,
    /// ssd, hdd or network.
    storage_type: String,
    /// webapp, oltp, warehouse, desktop or mixed.
    workload: String,
    /// Explicit max_connections, at least 10. Derived from the workload when absent.
    max_conn: Option<u32>,
    /// Number of data disks, at least 1.
    num_disks: u32,
    /// pg_dump, pg_basebackup or pglogical. Defaults to pg_dump.
    backup_method: Option<String>,
    /// Number of streaming replicas. Defaults to 0.
    num_replicas: Option<u32>,
    /// Database size in GB, at least 1.
    db_size_gb: f64,
}

#[utoipa::path(
    get,
    path = "/api/v1/tune",
    params(TuneQuery),
    responses(
        (status = 200, description = "Recommended settings and warnings", body = TuningResult,
            example = json!(pgtune_core::example::example_json())),
        (status = 400, description = "One or more parameters rejected", body = ValidationError),
        (status = 500, description = "Internal calculation fault")
    )
)]
pub(crate) async fn handle_tune(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TuningResult>, Response> {
    let input = match parse_params(&params) {
        Ok(input) => input,
        Err(e) => {
            debug!(fields = e.errors.len(), "rejected tune request");
            return Err((StatusCode::BAD_REQUEST, Json(e)).into_response());
        }
    };

    derive_settings(&input).map(Json).map_err(|e| {
        error!(error = %e, ?input, "settings derivation failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}
