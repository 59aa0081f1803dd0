//! lsa-api library - Leadership self-assessment REST server
//!
//! Scores questionnaires, stores assessments in SQLite and appends results to
//! a CSV file.

use std::sync::Arc;

use axum::Router;
use lsa_common::catalog::Catalog;
use lsa_common::db::SqliteAssessmentStore;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod csv_sink;
pub mod error;

use csv_sink::CsvSink;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Assessment storage
    pub store: SqliteAssessmentStore,
    /// CSV results file
    pub csv: Arc<CsvSink>,
    pub catalog: &'static Catalog,
}

impl AppState {
    /// Create new application state over the standard catalog
    pub fn new(db: SqlitePool, csv: CsvSink) -> Self {
        let catalog = Catalog::standard();
        Self {
            store: SqliteAssessmentStore::new(db, catalog),
            csv: Arc::new(csv),
            catalog,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let assessments = Router::new()
        .route("/api/users", get(api::list_users))
        .route("/api/assessments", get(api::list_assessments))
        .route("/api/assessment", post(api::create_assessment))
        .route("/api/assessment/:id", get(api::get_assessment))
        .route("/api/assessment-alt/:id", get(api::get_assessment));

    let results = Router::new()
        .route("/api/save-results", post(api::save_results))
        .route("/api/results", get(api::get_results));

    let scoring = Router::new()
        .route("/api/questionnaire", get(api::get_questionnaire))
        .route("/api/score", post(api::score_answers))
        .route("/api/recommendations/:dimension_id", get(api::get_recommendations));

    Router::new()
        .route("/", get(api::index))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .merge(assessments)
        .merge(results)
        .merge(scoring)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
