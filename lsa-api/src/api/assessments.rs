//! Assessment storage endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use lsa_common::persistence::{
    AssessmentStore, AssessmentSummary, NewAssessment, SavedAssessment, StoredAssessment,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/assessments
///
/// Newest first, each with the user's name and email when known.
pub async fn list_assessments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AssessmentSummary>>> {
    Ok(Json(state.store.list_assessments().await?))
}

/// POST /api/assessment
///
/// Stores the posted answers and dimension scores as a new assessment.
/// Returns 201 with the new ids and the average that was stored.
pub async fn create_assessment(
    State(state): State<AppState>,
    payload: Result<Json<NewAssessment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SavedAssessment>)> {
    let Json(assessment) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    debug!(
        "Saving assessment with {} answers and {} dimension scores",
        assessment.answers.len(),
        assessment.dimension_scores.len()
    );

    let saved = state.store.save_assessment(assessment).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/assessment/:id (also served as /api/assessment-alt/:id)
///
/// Missing dimension scores or answers come back as empty objects.
pub async fn get_assessment(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StoredAssessment>> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(state.store.get_assessment_by_id(id).await?))
}
