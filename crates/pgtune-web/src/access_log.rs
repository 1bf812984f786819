//! Access log middleware.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Swagger UI assets are noise in the log.
fn is_quiet_path(path: &str) -> bool {
    path.starts_with("/swagger-ui/") && path != "/swagger-ui/"
}

/// Logs one line per request. Failed tunings log the query string too, so
/// the offending input can be replayed.
pub(crate) async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let query = req.uri().query().map(str::to_owned);
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "-".to_owned(), |ci| ci.0.ip().to_string());

    let started = Instant::now();
    let response = next.run(req).await;
    let latency_ms = started.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        let query = query.as_deref().unwrap_or("");
        warn!(client, status = status.as_u16(), latency_ms, query, "{method} {path}");
    } else if !is_quiet_path(&path) {
        info!(client, status = status.as_u16(), latency_ms, "{method} {path}");
    }
    response
}
