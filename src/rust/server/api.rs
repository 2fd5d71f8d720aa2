//! Axum handlers for the prediction service.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::Specialization;

pub const PROBLEM_REQUIRED: &str = "Problem description is required";
pub const HEALTH_STATUS: &str = "ML service is running";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub problem: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub specialization: Specialization,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

fn json_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: msg.into() })).into_response()
}

/// POST /predict
///
/// A body that is not JSON, or whose `problem` is not a string, is a client
/// error and gets 400 with the parser's message. It never reaches the
/// predictor, so it cannot surface as a 500.
pub(super) async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected predict request: {}", rejection.body_text());
            return json_error(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let problem = match request.problem.as_deref() {
        Some(problem) if !problem.is_empty() => problem,
        _ => return json_error(StatusCode::BAD_REQUEST, PROBLEM_REQUIRED),
    };

    match state.predict(problem) {
        Ok((specialization, source)) => {
            debug!("Predicted {} via {}", specialization, source.as_str());
            Json(PredictResponse { specialization }).into_response()
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /health
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    })
}
