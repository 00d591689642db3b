// src/bin/api_server.rs

use student_records::transport;
use student_records::{open_store, Config, StudentService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // --- Store Initialization ---
    info!(backend = ?config.store_backend, "Initializing student store...");
    let store = open_store(&config).await?;
    let existing = store.count().await?;
    info!(
        backend = store.backend_name(),
        existing, "Student store initialized"
    );

    let app_state = transport::http::AppState {
        students: StudentService::new(store),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    let local_addr = listener.local_addr()?;
    info!("API server listening on http://{}", local_addr);
    info!("Swagger UI available at http://{}/swagger-ui", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    info!("Graceful shutdown complete.");
    Ok(())
}
