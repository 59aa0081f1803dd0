//! Health check and banner endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// Health response of the results API, naming the CSV file in use
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub csv_path: String,
}

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Leadership Self-Assessment API" }))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "lsa-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health
pub async fn api_health(State(state): State<AppState>) -> Json<ResultsHealthResponse> {
    Json(ResultsHealthResponse {
        status: "ok".to_string(),
        timestamp: lsa_common::time::now(),
        csv_path: state.csv.path().display().to_string(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(api_health))
}
