use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::query::ListParams;
use crate::errors::AppError;
use crate::models::{short_address, ApiResponse, Flow, Trade, Wallet};
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Wallet>>>, AppError> {
    let Query(params) = params?;
    let tag = params.tag.clone();
    let query = params.into_query(&state.config)?;
    let page = state.store.list_wallets(&query, tag.as_deref()).await?;

    Ok(Json(ApiResponse::paginated(page.items, page.pagination)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<Wallet>>, AppError> {
    match state.store.get_wallet(&address).await {
        Some(wallet) => Ok(Json(ApiResponse::ok(wallet))),
        None => Err(AppError::NotFound(format!(
            "wallet {} is not tracked",
            short_address(&address)
        ))),
    }
}

pub async fn flows(
    State(state): State<AppState>,
    Path(address): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Flow>>>, AppError> {
    let Query(params) = params?;
    let query = params.into_query(&state.config)?;
    let page = state.store.list_flows(&query, Some(&address)).await?;

    Ok(Json(ApiResponse::paginated(page.items, page.pagination)))
}

pub async fn trades(
    State(state): State<AppState>,
    Path(address): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Trade>>>, AppError> {
    let Query(params) = params?;
    let query = params.into_query(&state.config)?;
    let page = state.store.list_trades(&query, Some(&address)).await?;

    Ok(Json(ApiResponse::paginated(page.items, page.pagination)))
}
