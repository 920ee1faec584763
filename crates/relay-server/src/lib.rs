//! Web server module
//!
//! Five-endpoint HTTP surface over the session manager, provider registry,
//! and authorization broker, using Axum.

pub mod error;
pub mod openapi;
pub mod pages;
pub mod routes;
pub mod state;

pub use state::{AppState, ServerConfig};

use std::net::SocketAddr;

use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Start the web server.
///
/// Binds the configured address and serves until the process exits. Returns
/// the join handle and the bound port (useful when `port` is 0).
pub async fn start_server(
    config: ServerConfig,
    state: AppState,
) -> anyhow::Result<(tokio::task::JoinHandle<()>, u16)> {
    info!("Starting relay server on {}:{}", config.host, config.port);

    let app = build_app(state);

    let host_ip = config.host.parse::<std::net::IpAddr>()?;
    let addr = SocketAddr::from((host_ip, config.port));
    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();

    info!("Relay listening on http://{}:{}", config.host, port);
    info!("Public origin: {}", config.public_origin);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok((handle, port))
}

/// Build the Axum app with all routes and middleware.
///
/// No auth layer: an unguessable session id is the only capability, and
/// `/refresh` carries its own credential.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(600));

    Router::new()
        .route("/initiate", post(routes::initiate))
        .route("/login/{session_id}", get(routes::login))
        .route("/callback", get(routes::callback))
        .route("/poll/{session_id}", get(routes::poll))
        .route("/refresh", post(routes::refresh))
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi::serve_openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
