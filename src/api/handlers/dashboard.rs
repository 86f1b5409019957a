use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{ApiResponse, TimeRange};
use crate::store::DashboardSummary;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub range: Option<String>,
}

pub async fn summary(
    State(state): State<AppState>,
    params: Result<Query<SummaryParams>, QueryRejection>,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let Query(params) = params?;
    let range = params
        .range
        .as_deref()
        .map(str::parse::<TimeRange>)
        .transpose()
        .map_err(AppError::BadRequest)?
        .unwrap_or_default();

    let summary = state.store.summary_at(range, Utc::now()).await;
    Ok(Json(ApiResponse::ok(summary)))
}
