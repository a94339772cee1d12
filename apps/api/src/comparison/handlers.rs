//! Axum route handlers for the Comparison API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::comparison::prompts::{build_comparison_prompt, COMPARISON_SYSTEM};
use crate::comparison::{default_metrics, ComparisonMetric, ComparisonRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: Vec<ComparisonMetric>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub comparison_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub colleges: Vec<String>,
    pub metrics: Vec<ComparisonMetric>,
    /// The model's comparison, returned verbatim.
    pub comparison: String,
}

/// GET /api/v1/compare/metrics
pub async fn handle_list_metrics() -> Json<MetricsResponse> {
    Json(MetricsResponse {
        metrics: default_metrics(),
    })
}

/// POST /api/v1/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<ComparisonRequest>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let plan = request.plan()?;
    let prompt = build_comparison_prompt(&plan);

    let comparison = state
        .llm
        .complete(&prompt, COMPARISON_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Comparison LLM call failed: {e}")))?;

    let comparison_id = Uuid::new_v4();
    info!(
        "Comparison {comparison_id}: {} colleges over {} metrics",
        plan.colleges.len(),
        plan.metrics.len()
    );

    Ok(Json(ComparisonResponse {
        comparison_id,
        generated_at: Utc::now(),
        colleges: plan.colleges,
        metrics: plan.metrics,
        comparison,
    }))
}
