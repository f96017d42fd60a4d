//! Request handlers for the inference service.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::features::vector::FeatureVector;
use crate::scorer::Label;
use crate::server::AppState;

/// Body of `POST /predict`.
///
/// `url` is optional only so its absence can be reported as a 400 with a
/// message instead of a bare deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub url: Option<String>,
}

/// Successful response of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub url: String,
    pub prediction: Label,
    pub confidence: f64,
}

/// Successful response of `POST /predict/features`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePredictResponse {
    pub prediction: Label,
    pub confidence: f64,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ready: bool,
    pub model_version: Option<String>,
}

/// Error payload shared by all failure responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A handler failure with its HTTP status.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn unavailable() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Model or scaler is not available.".to_string(),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal server error occurred.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// `POST /predict`: extract features from a URL and classify it.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    predict_url(&state, request).map(Json)
}

/// `POST /predict/features`: classify operator-supplied feature values,
/// bypassing the extractor.
pub async fn predict_features(
    State(state): State<AppState>,
    Json(vector): Json<FeatureVector>,
) -> Result<Json<FeaturePredictResponse>, ApiError> {
    classify_features(&state, vector).map(Json)
}

/// `GET /health`: readiness report.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health_report(&state))
}

/// `GET /`: the interactive exploration console.
pub async fn console() -> Html<&'static str> {
    Html(include_str!("console.html"))
}

pub(crate) fn predict_url(
    state: &AppState,
    request: PredictRequest,
) -> Result<PredictResponse, ApiError> {
    let url = request
        .url
        .ok_or_else(|| ApiError::bad_request("Invalid request. \"url\" key is required."))?;
    let scorer = state.scorer.as_ref().ok_or_else(ApiError::unavailable)?;

    let features = state.extractor.extract(&url);
    let verdict = scorer.classify(&features).map_err(|err| {
        error!(%err, url, "scoring failed");
        ApiError::internal()
    })?;

    Ok(PredictResponse {
        url,
        prediction: verdict.label,
        confidence: verdict.confidence,
    })
}

pub(crate) fn classify_features(
    state: &AppState,
    vector: FeatureVector,
) -> Result<FeaturePredictResponse, ApiError> {
    vector
        .validate()
        .map_err(|err| ApiError::bad_request(&err.to_string()))?;
    let scorer = state.scorer.as_ref().ok_or_else(ApiError::unavailable)?;

    let verdict = scorer.classify(&vector).map_err(|err| {
        error!(%err, "scoring failed for manual feature input");
        ApiError::internal()
    })?;

    Ok(FeaturePredictResponse {
        prediction: verdict.label,
        confidence: verdict.confidence,
    })
}

pub(crate) fn health_report(state: &AppState) -> HealthResponse {
    HealthResponse {
        ready: state.scorer.as_ref().is_some_and(|scorer| scorer.is_ready()),
        model_version: state
            .scorer
            .as_ref()
            .map(|scorer| scorer.metadata().version.clone()),
    }
}
