pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::comparison::handlers as comparison;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard API
        .route("/api/v1/wizard/steps", get(recommendation::handle_list_steps))
        .route(
            "/api/v1/wizard/steps/:index",
            get(recommendation::handle_get_step),
        )
        .route("/api/v1/wizard/advance", post(recommendation::handle_advance))
        .route("/api/v1/wizard/back", post(recommendation::handle_back))
        // Recommendation API
        .route(
            "/api/v1/currencies",
            get(recommendation::handle_list_currencies),
        )
        .route("/api/v1/recommendations", post(recommendation::handle_recommend))
        .route(
            "/api/v1/recommendations/prompt",
            post(recommendation::handle_prompt_preview),
        )
        .route(
            "/api/v1/recommendations/parse",
            post(recommendation::handle_parse),
        )
        // Comparison API
        .route("/api/v1/compare", post(comparison::handle_compare))
        .route(
            "/api/v1/compare/metrics",
            get(comparison::handle_list_metrics),
        )
        .with_state(state)
}
