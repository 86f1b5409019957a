use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::ingestion::{accept_batch, Rejected};
use crate::models::{ApiResponse, Flow, Trade, Wallet};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<Rejected>,
}

type Envelope<T> = Result<Json<ApiResponse<Vec<T>>>, JsonRejection>;

fn body<T>(payload: Envelope<T>) -> Result<ApiResponse<Vec<T>>, AppError> {
    payload
        .map(|Json(envelope)| envelope)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub async fn wallets(
    State(state): State<AppState>,
    payload: Envelope<Wallet>,
) -> Result<Json<ApiResponse<IngestReport>>, AppError> {
    let batch = accept_batch("wallets", body(payload)?)?;
    let accepted = state.store.upsert_wallets(batch.accepted).await;

    Ok(Json(ApiResponse::ok(IngestReport {
        accepted,
        rejected: batch.rejected,
    })))
}

pub async fn flows(
    State(state): State<AppState>,
    payload: Envelope<Flow>,
) -> Result<Json<ApiResponse<IngestReport>>, AppError> {
    let batch = accept_batch("flows", body(payload)?)?;
    let accepted = state.store.insert_flows(batch.accepted).await;

    Ok(Json(ApiResponse::ok(IngestReport {
        accepted,
        rejected: batch.rejected,
    })))
}

pub async fn trades(
    State(state): State<AppState>,
    payload: Envelope<Trade>,
) -> Result<Json<ApiResponse<IngestReport>>, AppError> {
    let batch = accept_batch("trades", body(payload)?)?;
    let accepted = state.store.upsert_trades(batch.accepted).await;

    Ok(Json(ApiResponse::ok(IngestReport {
        accepted,
        rejected: batch.rejected,
    })))
}
