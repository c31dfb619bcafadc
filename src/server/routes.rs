//! Axum route handlers for the MindEase HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`                 : `{"status": "ok", "service": "mindease", "version": ...}`
//! - `POST /users/:user_id/moods`   : Log a mood, returns analysis + coping suggestions
//! - `GET  /users/:user_id/insights`: Pattern insight over the recent mood window
//! - `GET  /coping/:mood`           : Coping suggestions for a mood label
//! - `POST /analyze`                : Sentiment analysis of `{"text": ...}` (3 to 1000 chars used)
//! - `POST /batch-analyze`          : Sentiment analysis of `{"texts": [...]}`

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::insight::sentiment::{clip_text, MIN_TEXT_LEN};
use crate::insight::{
    MoodLogOutcome, MoodPipeline, NewMoodEntry, PatternOutcome, PipelineError, SentimentResult,
};

type ApiError = (StatusCode, Json<Value>);

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: MoodPipeline,
}

impl AppState {
    pub fn new(pipeline: MoodPipeline) -> Self {
        Self { pipeline }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/users/:user_id/moods", post(log_mood_handler))
        .route("/users/:user_id/insights", get(insights_handler))
        .route("/coping/:mood", get(coping_handler))
        .route("/analyze", post(analyze_handler))
        .route("/batch-analyze", post(batch_analyze_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// Unreadable or mistyped request bodies are client errors like any other.
fn bad_body(rejection: JsonRejection) -> ApiError {
    log::debug!("Rejected request body: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn pipeline_error(err: PipelineError) -> ApiError {
    match err {
        PipelineError::Validation(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        other => {
            log::error!("Mood pipeline failure: {}", other);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// GET /health: liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "mindease",
    }))
}

/// POST /users/:user_id/moods: log a mood entry.
///
/// Request:  `{"mood": "anxious", "intensity": 7, "note": "..."}`
/// Response: 201 with `{"record": ..., "analysis": ... | null, "suggestions": [...]}`
async fn log_mood_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<NewMoodEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<MoodLogOutcome>), ApiError> {
    let Json(entry) = body.map_err(bad_body)?;
    let outcome = state
        .pipeline
        .log_mood(&user_id, entry)
        .await
        .map_err(pipeline_error)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /users/:user_id/insights: pattern insight or a not-enough-data marker.
async fn insights_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PatternOutcome>, ApiError> {
    let outcome = state
        .pipeline
        .user_insights(&user_id)
        .await
        .map_err(pipeline_error)?;
    Ok(Json(outcome))
}

/// GET /coping/:mood: ranked coping suggestions.
async fn coping_handler(
    State(state): State<AppState>,
    Path(mood): Path<String>,
) -> impl IntoResponse {
    let suggestions = state.pipeline.coping_suggestions(&mood);
    Json(serde_json::json!({
        "mood": mood,
        "suggestions": suggestions,
    }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    text: Option<String>,
}

/// POST /analyze: analyze one text.
///
/// Text is trimmed, must keep at least 3 chars, and only its first 1000
/// chars are analyzed.
async fn analyze_handler(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<SentimentResult>, ApiError> {
    let Json(request) = body.map_err(bad_body)?;
    let Some(text) = request.text else {
        return Err(error_response(StatusCode::BAD_REQUEST, "No text provided"));
    };
    let text = text.trim();
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(error_response(StatusCode::BAD_REQUEST, "Text too short for analysis"));
    }
    Ok(Json(state.pipeline.analyze_text(clip_text(text)).await))
}

#[derive(Debug, Deserialize)]
struct BatchAnalyzeRequest {
    #[serde(default)]
    texts: Vec<String>,
}

/// POST /batch-analyze: analyze up to 50 texts.
async fn batch_analyze_handler(
    State(state): State<AppState>,
    body: Result<Json<BatchAnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body.map_err(bad_body)?;
    if request.texts.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid input. Expected array of texts",
        ));
    }
    let results = state.pipeline.analyze_batch(&request.texts).await;
    Ok(Json(serde_json::json!({
        "success": true,
        "count": results.len(),
        "results": results,
    })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
