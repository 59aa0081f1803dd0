//! Questionnaire, scoring and recommendation endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use lsa_common::assessment::DimensionAdvice;
use lsa_common::catalog::Catalog;
use lsa_common::recommendations::{get_recommendations as recommendations_for_score, ScoreBand};
use lsa_common::scoring::{unanswered_questions, Answers};
use lsa_common::{assemble_result, AssessmentResult};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/questionnaire
pub async fn get_questionnaire(State(state): State<AppState>) -> Json<&'static Catalog> {
    Json(state.catalog)
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub answers: Answers,
    /// Timestamp for the result; the server clock when absent
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: AssessmentResult,
    pub recommendations: Vec<DimensionAdvice>,
    /// Catalog questions with no answer in the request
    pub unanswered: Vec<String>,
}

/// POST /api/score
///
/// Scores the answers without storing anything.
pub async fn score_answers(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> ApiResult<Json<ScoreResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let unanswered = unanswered_questions(&request.answers, state.catalog)
        .into_iter()
        .map(|q| q.id.clone())
        .collect();
    let timestamp = request.date.unwrap_or_else(lsa_common::time::now);
    let result = assemble_result(request.answers, state.catalog, timestamp)?;
    let recommendations = result.advice(state.catalog);

    Ok(Json(ScoreResponse {
        result,
        recommendations,
        unanswered,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub score: i64,
}

/// GET /api/recommendations/:dimension_id?score=N
///
/// Unknown dimensions get the generic list.
pub async fn get_recommendations(
    Path(dimension_id): Path<String>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> ApiResult<Json<DimensionAdvice>> {
    let Query(RecommendationQuery { score }) =
        query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if !(0..=100).contains(&score) {
        return Err(ApiError::BadRequest(format!(
            "Score must be between 0 and 100, got {}",
            score
        )));
    }

    Ok(Json(DimensionAdvice {
        recommendations: recommendations_for_score(&dimension_id, score).to_vec(),
        band: ScoreBand::from_score(score),
        dimension_id,
        score,
    }))
}
