//! CSV results endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use lsa_common::scoring::{
    compute_average, validate_score, validate_submission, Answers, DimensionScores,
};
use lsa_common::Error;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::csv_sink::CsvEntry;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Result object as the questionnaire client posts it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedResult {
    pub answers: Option<Answers>,
    pub dimension_scores: Option<DimensionScores>,
    pub average_score: Option<i64>,
    pub date: Option<DateTime<Utc>>,
}

/// POST /api/save-results body
///
/// Top-level fields take precedence over the same fields inside `results`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultsRequest {
    pub manager_name: Option<String>,
    pub results: Option<PostedResult>,
    pub date: Option<DateTime<Utc>>,
    pub average_score: Option<i64>,
    pub dimension_scores: Option<DimensionScores>,
    pub answers: Option<Answers>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultsResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
}

/// POST /api/save-results
///
/// Appends one line to the CSV results file. 400 when the body carries no
/// dimension scores at all, or when any answer, score or average is out of
/// range or names a question outside the catalog.
pub async fn save_results(
    State(state): State<AppState>,
    payload: Result<Json<SaveResultsRequest>, JsonRejection>,
) -> ApiResult<Json<SaveResultsResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let nested = request.results.unwrap_or_default();

    let dimension_scores = request
        .dimension_scores
        .or(nested.dimension_scores)
        .ok_or_else(|| ApiError::BadRequest("No valid results were provided".to_string()))?;
    let answers = request.answers.or(nested.answers).unwrap_or_default();

    validate_submission(&answers, &dimension_scores)?;
    if let Some(question_id) = answers.keys().find(|id| state.catalog.question(id).is_none()) {
        return Err(Error::Validation(format!("Answer given for unknown question {}", question_id)).into());
    }

    let average_score = match request.average_score.or(nested.average_score) {
        Some(average) => {
            validate_score("average", average)?;
            average
        }
        None => compute_average(&dimension_scores),
    };
    let date = request
        .date
        .or(nested.date)
        .unwrap_or_else(lsa_common::time::now);

    let entry = CsvEntry {
        manager_name: request.manager_name.as_deref(),
        date,
        average_score,
        dimension_scores: &dimension_scores,
        answers: &answers,
    };
    state.csv.append(&entry).await?;

    let manager = request
        .manager_name
        .as_deref()
        .unwrap_or(crate::csv_sink::ANONYMOUS_MANAGER);
    info!("Saved results for {} to {}", manager, state.csv.path().display());

    Ok(Json(SaveResultsResponse {
        success: true,
        message: format!("Results saved for {}", manager),
        file_path: state.csv.path().display().to_string(),
    }))
}

/// GET /api/results
pub async fn get_results(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let content = state.csv.read_all().await?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], content))
}
