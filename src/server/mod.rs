pub mod cors;
pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::{Config, ServerConfig},
    engine::OpenAiEngine,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    // Load the engine before binding so a bad model never serves traffic
    let engine = OpenAiEngine::load(config.engine.clone()).await?;

    let app_state = AppState::new(engine, &config);
    let app = router(app_state, &config.server);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} in {:?} mode",
        addr, config.server.mode
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Mounts the routes enabled by `server.mode`; `/` and `/health` are always
/// present.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    if server.mode.serves_vision() {
        app = app.route("/analyze", get(handlers::analyze_image));
    }

    if server.mode.serves_text() {
        app = app.route("/process", post(handlers::process_text));
    }

    app.layer(cors::layer(&server.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
