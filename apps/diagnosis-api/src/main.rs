//! Diagnosis API server - backend for the SST compliance questionnaire
//!
//! Provides REST endpoints for:
//! - Running the fine diagnosis over questionnaire answers
//! - Health checks
//! - Serving the built front-end with an SPA fallback

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{any, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod models;
mod state;
mod webhook;

use state::AppState;

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/diagnosis", post(handlers::run_diagnosis))
        .route("/api/*rest", any(handlers::api_not_found))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development default: permissive
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("diagnosis_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing diagnosis API...");
    let state = Arc::new(AppState::from_env()?);

    let cors = cors_layer(&state.allowed_origins);

    let mut app = router(state.clone());

    // Serve the built front-end when present; unmatched non-API routes
    // fall back to index.html so the client router can handle them.
    if let Some(static_dir) = &state.static_dir {
        let index = static_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
        info!("serving static front-end from {}", static_dir.display());
    }

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Parse bind address
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting diagnosis API on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
