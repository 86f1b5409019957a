use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::api::query::ListParams;
use crate::errors::AppError;
use crate::models::{ApiResponse, Flow};
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Flow>>>, AppError> {
    let Query(params) = params?;
    let query = params.into_query(&state.config)?;
    let page = state.store.list_flows(&query, None).await?;

    Ok(Json(ApiResponse::paginated(page.items, page.pagination)))
}
