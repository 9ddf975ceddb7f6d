pub mod response;

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::config::Config;
use crate::facade::QueryFacade;
use crate::features;
use crate::middleware;

/// Create the application router with all routes and middleware
pub fn create_router(facade: QueryFacade, config: &Config) -> Router {
    let api_v1 = features::router(facade.clone());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(facade)
        .nest("/api/v1", api_v1)
        // Layers apply from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Bind, serve until a shutdown signal arrives, then drain
pub async fn serve(facade: QueryFacade, config: Config) -> anyhow::Result<()> {
    let app = create_router(facade, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "QuakeCat Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Reports the catalogue load state without triggering a load
async fn health(State(facade): State<QueryFacade>) -> Response {
    let body = json!({
        "status": "healthy",
        "catalogue": facade.state(),
        "records": facade.record_count().await,
    });

    (StatusCode::OK, Json(body)).into_response()
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
