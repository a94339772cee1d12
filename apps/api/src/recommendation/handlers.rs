//! Axum route handlers for the wizard and Recommendation API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::recommendation::currency::{self, Currency};
use crate::recommendation::extractor::{self, CollegeCandidate};
use crate::recommendation::preferences::Preferences;
use crate::recommendation::prompts::{build_recommendation_prompt, RECOMMENDATION_SYSTEM};
use crate::recommendation::wizard::{self, StepDescriptor, WizardError, WizardStep, WizardTransition};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub total_steps: usize,
    pub steps: Vec<StepDescriptor>,
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub step: usize,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Deserialize)]
pub struct BackRequest {
    pub step: usize,
}

#[derive(Debug, Serialize)]
pub struct PromptPreviewResponse {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// The model's full answer, shown alongside the cards.
    pub raw_response: String,
    pub colleges: Vec<CollegeCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct CurrencyQuery {
    /// IANA zone reported by the client, e.g. `Asia/Kolkata`.
    pub timezone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrenciesResponse {
    pub detected: &'static Currency,
    pub currencies: &'static [Currency],
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub colleges: Vec<CollegeCandidate>,
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::UnknownStep(_) => AppError::NotFound(err.to_string()),
            WizardError::ActionTypeRequired => AppError::Validation(err.to_string()),
        }
    }
}

/// Normalizes the answers and rejects them if any problem is found.
fn checked_preferences(preferences: Preferences) -> Result<Preferences, AppError> {
    let preferences = preferences.normalized();
    let problems = preferences.validate();
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }
    Ok(preferences)
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/wizard/steps
pub async fn handle_list_steps() -> Json<StepsResponse> {
    Json(StepsResponse {
        total_steps: wizard::TOTAL_STEPS,
        steps: wizard::descriptors(),
    })
}

/// GET /api/v1/wizard/steps/:index
pub async fn handle_get_step(Path(index): Path<usize>) -> Result<Json<StepDescriptor>, AppError> {
    let step = WizardStep::from_index(index).ok_or(WizardError::UnknownStep(index))?;
    Ok(Json(step.descriptor()))
}

/// POST /api/v1/wizard/advance
///
/// Checks the current step's answer and says where the client goes next.
pub async fn handle_advance(
    Json(request): Json<AdvanceRequest>,
) -> Result<Json<WizardTransition>, AppError> {
    Ok(Json(wizard::advance(request.step, &request.preferences)?))
}

/// POST /api/v1/wizard/back
pub async fn handle_back(
    Json(request): Json<BackRequest>,
) -> Result<Json<WizardTransition>, AppError> {
    Ok(Json(wizard::back(request.step)?))
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendation handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/currencies?timezone=Asia/Kolkata
///
/// Supported budget currencies plus the one suggested for the client's zone.
pub async fn handle_list_currencies(Query(query): Query<CurrencyQuery>) -> Json<CurrenciesResponse> {
    let detected = match query.timezone.as_deref() {
        Some(tz) => currency::detect_from_timezone(tz),
        None => currency::find(currency::DEFAULT_CURRENCY_CODE).unwrap_or(&currency::CURRENCIES[0]),
    };
    Json(CurrenciesResponse {
        detected,
        currencies: currency::CURRENCIES,
    })
}

/// POST /api/v1/recommendations/prompt
///
/// Returns the prompt that would be sent, without calling the model.
pub async fn handle_prompt_preview(
    Json(preferences): Json<Preferences>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    let preferences = checked_preferences(preferences)?;
    Ok(Json(PromptPreviewResponse {
        prompt: build_recommendation_prompt(&preferences),
    }))
}

/// POST /api/v1/recommendations
///
/// Full pipeline: preferences → prompt → LLM → extractor → college cards.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let preferences = checked_preferences(preferences)?;
    let prompt = build_recommendation_prompt(&preferences);

    let raw_response = state
        .llm
        .complete(&prompt, RECOMMENDATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Recommendation LLM call failed: {e}")))?;

    let colleges = extractor::extract(&raw_response);
    let recommendation_id = Uuid::new_v4();
    info!(
        "Recommendation {recommendation_id}: {} colleges extracted from {} chars",
        colleges.len(),
        raw_response.len()
    );

    Ok(Json(RecommendationResponse {
        recommendation_id,
        generated_at: Utc::now(),
        raw_response,
        colleges,
    }))
}

/// POST /api/v1/recommendations/parse
///
/// Runs the extractor on caller-supplied text. Never fails on content.
pub async fn handle_parse(Json(request): Json<ParseRequest>) -> Json<ParseResponse> {
    Json(ParseResponse {
        colleges: extractor::extract(&request.text),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{get, post_json, CannedBackend, FailingBackend};

    const CANNED_ANSWER: &str = "Here are your matches:\n\
        1. Indian Institute of Technology Bombay is located in Mumbai, Maharashtra. \
        Tuition fees are ₹250000 per year. It is known for cutting-edge research.\n\
        2. Birla Institute of Technology and Science Pilani is situated in Pilani, Rajasthan. \
        The annual fees are 450000 per year and admission requires a strong BITSAT score.\n";

    #[tokio::test]
    async fn test_list_steps() {
        let (status, body) = get(CannedBackend::new(""), "/api/v1/wizard/steps").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_steps"], 11);
        assert_eq!(body["steps"][0]["key"], "action_type");
        assert_eq!(body["steps"][10]["progress_percent"], 100);
    }

    #[tokio::test]
    async fn test_get_unknown_step_is_not_found() {
        let (status, body) = get(CannedBackend::new(""), "/api/v1/wizard/steps/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_advance_requires_action_type() {
        let (status, body) = post_json(
            CannedBackend::new(""),
            "/api/v1/wizard/advance",
            json!({"step": 0, "preferences": {}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_advance_and_back() {
        let (status, body) = post_json(
            CannedBackend::new(""),
            "/api/v1/wizard/advance",
            json!({"step": 0, "preferences": {"action_type": "match"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"kind": "step", "step": 1, "progress_percent": 18}));

        let (_, body) = post_json(
            CannedBackend::new(""),
            "/api/v1/wizard/back",
            json!({"step": 3}),
        )
        .await;
        assert_eq!(body["step"], 2);
    }

    #[tokio::test]
    async fn test_prompt_preview() {
        let (status, body) = post_json(
            CannedBackend::new(""),
            "/api/v1/recommendations/prompt",
            json!({"specific_majors": ["Computer Science"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let prompt = body["prompt"].as_str().unwrap();
        assert!(prompt.contains("Majors: Computer Science"));
        assert!(prompt.contains("top 5 colleges"));
    }

    #[tokio::test]
    async fn test_invalid_preferences_rejected() {
        let (status, body) = post_json(
            CannedBackend::new(CANNED_ANSWER),
            "/api/v1/recommendations",
            json!({"budget": {"min": 50000, "max": 3000000, "selected": 10}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("budget.selected"));
    }

    #[tokio::test]
    async fn test_recommend_extracts_cards() {
        let (status, body) = post_json(
            CannedBackend::new(CANNED_ANSWER),
            "/api/v1/recommendations",
            json!({"action_type": "match"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["raw_response"], CANNED_ANSWER);
        let colleges = body["colleges"].as_array().unwrap();
        assert_eq!(colleges.len(), 2);
        assert!(colleges[0]["name"]
            .as_str()
            .unwrap()
            .contains("Indian Institute of Technology Bombay"));
        assert!(body["recommendation_id"].is_string());
    }

    #[tokio::test]
    async fn test_recommend_llm_failure_is_hidden() {
        let (status, body) = post_json(
            FailingBackend,
            "/api/v1/recommendations",
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(body["error"]["message"], "An AI processing error occurred");
    }

    #[tokio::test]
    async fn test_list_currencies_detects_from_timezone() {
        let (status, body) = get(
            CannedBackend::new(""),
            "/api/v1/currencies?timezone=Europe/London",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["detected"]["code"], "GBP");
        assert_eq!(body["currencies"].as_array().unwrap().len(), 44);

        let (_, body) = get(CannedBackend::new(""), "/api/v1/currencies").await;
        assert_eq!(body["detected"]["code"], "INR");
    }

    #[tokio::test]
    async fn test_parse_blank_text() {
        let (status, body) = post_json(
            CannedBackend::new(""),
            "/api/v1/recommendations/parse",
            json!({"text": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["colleges"], json!([]));
    }

    #[tokio::test]
    async fn test_parse_short_text_falls_back() {
        let (_, body) = post_json(
            CannedBackend::new(""),
            "/api/v1/recommendations/parse",
            json!({"text": "Short text with no real data."}),
        )
        .await;
        assert_eq!(body["colleges"][0]["name"], "Recommended College 1");
        assert!(body["colleges"][0].get("rating").is_none());
    }
}
