use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes: probes and scrapes
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Dashboard feed and ingestion, behind the bearer token when one is configured
    let protected = Router::new()
        // Dashboard
        .route("/api/dashboard/summary", get(handlers::dashboard::summary))
        // Wallets
        .route("/api/wallets", get(handlers::wallets::list))
        .route("/api/wallets/:address", get(handlers::wallets::detail))
        .route("/api/wallets/:address/flows", get(handlers::wallets::flows))
        .route("/api/wallets/:address/trades", get(handlers::wallets::trades))
        // Flows
        .route("/api/flows", get(handlers::flows::list))
        // Trades
        .route("/api/trades", get(handlers::trades::list))
        .route("/api/trades/:hash", get(handlers::trades::detail))
        // Ingestion from the upstream indexer
        .route("/api/ingest/wallets", post(handlers::ingest::wallets))
        .route("/api/ingest/flows", post(handlers::ingest::flows))
        .route("/api/ingest/trades", post(handlers::ingest::trades))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // The dashboard is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
