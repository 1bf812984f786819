mod access_log;
mod handlers;
mod openapi;

use std::net::SocketAddr;
use std::process;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use openapi::ApiDoc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

// ============================================================
// CLI
// ============================================================

#[derive(Parser)]
#[command(name = "pgtune-web", about = "pgtune web API server", version = pgtune_core::VERSION)]
struct Args {
    /// Listen address.
    #[arg(long, default_value = "0.0.0.0:8080", env = "PGTUNE_LISTEN")]
    listen: SocketAddr,
}

// ============================================================
// Main
// ============================================================

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pgtune_web=info")),
        )
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(serve(args.listen)) {
        error!(error = %e, "server error");
        process::exit(1);
    }
}

async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let app = router().into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(version = pgtune_core::VERSION, %addr, "listening");

    axum::serve(listener, app).await
}

fn router() -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::handle_health))
        .route("/api/v1/tune", get(handlers::handle_tune))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(access_log::access_log))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}
