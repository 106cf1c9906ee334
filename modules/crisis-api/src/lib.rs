//! HTTP transport for the crisis simulator.

pub mod rest;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crisis_engine::{Simulator, StaticCatalog};

pub struct AppState {
    pub simulator: Simulator<StaticCatalog>,
}

impl AppState {
    pub fn new(catalog: StaticCatalog) -> Self {
        Self {
            simulator: Simulator::new(catalog),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Reference data
        .route("/api/cities", get(rest::api_cities))
        .route("/api/cities/{key}", get(rest::api_city_detail))
        // Simulation + advisory
        .route("/api/simulate", post(rest::api_simulate))
        .route("/api/ai/analyze", post(rest::api_analyze))
        .route("/api/ai/predict", post(rest::api_predict))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Results are computed per request and never reused
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
