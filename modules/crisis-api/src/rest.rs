use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crisis_common::{CrisisError, DisasterType, SimulationParams, SimulationResult};
use crisis_engine::CityCatalog;

use crate::AppState;

const MISSING_PARAMETERS: &str = "Missing required parameters";

// --- Request bodies ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    simulation: Option<SimulationResult>,
    city_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    city_key: Option<String>,
    disaster_type: Option<DisasterType>,
    base_simulation: Option<SimulationResult>,
}

// --- Helpers ---

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({"error": message.into()}))).into_response()
}

fn crisis_error_response(err: CrisisError) -> Response {
    match err {
        CrisisError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "City not found"),
        CrisisError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        other => {
            warn!(error = %other, "Request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn rejection_response(rejection: JsonRejection) -> Response {
    warn!(error = %rejection, "Rejected request body");
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

// --- Handlers ---

pub async fn api_cities(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.simulator.catalog().summaries())
}

pub async fn api_city_detail(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    match state.simulator.catalog().lookup(&key) {
        Ok(city) => Json(city).into_response(),
        Err(e) => crisis_error_response(e),
    }
}

pub async fn api_simulate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SimulationParams>, JsonRejection>,
) -> impl IntoResponse {
    let Json(params) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };

    let request = match params.into_request() {
        Ok(request) => request,
        Err(e) => return crisis_error_response(e),
    };

    match state.simulator.simulate(&request) {
        Ok(result) => Json(result).into_response(),
        Err(e) => crisis_error_response(e),
    }
}

pub async fn api_analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let (Some(simulation), Some(city_key)) = (body.simulation, body.city_key) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_PARAMETERS);
    };

    match state.simulator.analyze(&simulation, &city_key) {
        Ok(report) => {
            info!(city = city_key.as_str(), "Re-analyzed simulation");
            Json(report).into_response()
        }
        Err(e) => crisis_error_response(e),
    }
}

pub async fn api_predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let (Some(city_key), Some(disaster), Some(base)) =
        (body.city_key, body.disaster_type, body.base_simulation)
    else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_PARAMETERS);
    };

    match state.simulator.predict(&city_key, disaster, &base) {
        Ok(scenarios) => Json(serde_json::json!({ "scenarios": scenarios })).into_response(),
        Err(e) => crisis_error_response(e),
    }
}
