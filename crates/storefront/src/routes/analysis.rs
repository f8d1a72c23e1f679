//! AI hair analysis handler.

use axum::Json;
use axum::extract::State;

use crate::error::{AppError, Result};
use crate::extract::JsonBody;
use crate::recommend::{self, HairAnalysis, HairAnalysisRequest};
use crate::state::AppState;

/// `POST /api/hair-analysis`
pub async fn hair_analysis(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<HairAnalysisRequest>,
) -> Result<Json<HairAnalysis>> {
    let Some(claude) = state.claude() else {
        return Err(AppError::NotConfigured("AI service not configured"));
    };
    recommend::analyze_hair(state.square(), claude, &req)
        .await
        .map(Json)
}
