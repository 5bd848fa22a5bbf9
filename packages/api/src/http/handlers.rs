use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::state::AppState;
use crate::samples::{SampleClause, SAMPLE_CLAUSES};
use crate::types::{AnalysisResult, BatchResponse, ClauseRequest};

pub const SERVICE_NAME: &str = "ContractRiskAI";

#[derive(Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub documentation: &'static str,
}

#[derive(Serialize)]
pub struct SamplesResponse {
    pub examples: &'static [SampleClause],
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "active",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        documentation: "/docs",
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<ClauseRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let result = state.analyzer.analyze(&request).await?;
    Ok(Json(result))
}

pub async fn batch_analyze(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ClauseRequest>>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(requests) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let response = state.analyzer.analyze_batch(&requests).await?;
    Ok(Json(response))
}

pub async fn examples() -> Json<SamplesResponse> {
    Json(SamplesResponse {
        examples: SAMPLE_CLAUSES,
    })
}
