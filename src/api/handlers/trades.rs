use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::query::ListParams;
use crate::errors::AppError;
use crate::models::{short_address, ApiResponse, Trade};
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Trade>>>, AppError> {
    let Query(params) = params?;
    let query = params.into_query(&state.config)?;
    let page = state.store.list_trades(&query, None).await?;

    Ok(Json(ApiResponse::paginated(page.items, page.pagination)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<ApiResponse<Trade>>, AppError> {
    state
        .store
        .get_trade(&hash)
        .await
        .map(|trade| Json(ApiResponse::ok(trade)))
        .ok_or_else(|| AppError::NotFound(format!("trade {} not found", short_address(&hash))))
}
