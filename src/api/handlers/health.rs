use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let counts = state.store.counts().await;

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "wallets": counts.wallets,
            "flows": counts.flows,
            "trades": counts.trades,
        })),
    )
}
