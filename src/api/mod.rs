use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    TravelAiError, VERSION,
    duration::TripDuration,
    itinerary::ItineraryNormalizer,
    models::{GeneratedItinerary, ParsedItinerary, TripRequest},
    planner::ItineraryPlanner,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Absent when no LLM provider is configured; generation then answers 503
    pub planner: Option<Arc<ItineraryPlanner>>,
    pub normalizer: ItineraryNormalizer,
}

impl AppState {
    #[must_use]
    pub fn new(planner: Option<Arc<ItineraryPlanner>>) -> Self {
        Self {
            planner,
            normalizer: ItineraryNormalizer::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRequest {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
    #[serde(default)]
    pub strict: bool,
}

/// Error wrapper mapping [`TravelAiError`] to HTTP responses
pub struct ApiError(TravelAiError);

impl From<TravelAiError> for ApiError {
    fn from(err: TravelAiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TravelAiError::Validation { .. } => StatusCode::BAD_REQUEST,
            TravelAiError::Parse { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TravelAiError::Api { .. } => StatusCode::BAD_GATEWAY,
            TravelAiError::Config { .. } => StatusCode::SERVICE_UNAVAILABLE,
            TravelAiError::Cache { .. } | TravelAiError::Io { .. } | TravelAiError::General { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Server-side failures carry upstream text; it stays in the log only.
        let body = if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
            json!({ "error": self.0.user_message() })
        } else {
            json!({
                "error": self.0.user_message(),
                "detail": self.0.to_string(),
            })
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trip/duration", post(trip_duration))
        .route("/itinerary/parse", post(parse_itinerary))
        .route("/itinerary/generate", post(generate_itinerary))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

async fn trip_duration(Json(payload): Json<DurationRequest>) -> Json<TripDuration> {
    Json(TripDuration::from_dates(
        payload.start_date.as_deref(),
        payload.end_date.as_deref(),
    ))
}

async fn parse_itinerary(
    State(state): State<AppState>,
    Json(payload): Json<ParseRequest>,
) -> Result<Json<ParsedItinerary>, ApiError> {
    let parsed = if payload.strict {
        state
            .normalizer
            .normalize_strict(&payload.text)
            .map_err(TravelAiError::from)?
    } else {
        state.normalizer.normalize(&payload.text)
    };
    Ok(Json(parsed))
}

async fn generate_itinerary(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<GeneratedItinerary>, ApiError> {
    let planner = state.planner.as_ref().ok_or_else(|| {
        TravelAiError::config("Itinerary generation is unavailable: no LLM provider configured")
    })?;
    Ok(Json(planner.plan(&request).await?))
}
