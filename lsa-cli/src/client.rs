//! HTTP client for the lsa-api server
//!
//! Implements [`AssessmentStore`] over the REST endpoints so the terminal
//! client persists through the same interface as the server.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lsa_common::persistence::{
    AssessmentStore, AssessmentSummary, NewAssessment, SavedAssessment, StoredAssessment, User,
};
use lsa_common::scoring::{Answers, DimensionScores};
use lsa_common::{AssessmentResult, Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Body of `POST /api/save-results`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvResultsPayload<'a> {
    pub manager_name: Option<&'a str>,
    pub date: DateTime<Utc>,
    pub average_score: i64,
    pub dimension_scores: &'a DimensionScores,
    pub answers: &'a Answers,
    pub results: &'a AssessmentResult,
}

impl<'a> CsvResultsPayload<'a> {
    pub fn new(result: &'a AssessmentResult, manager_name: Option<&'a str>) -> Self {
        Self {
            manager_name,
            date: result.timestamp,
            average_score: result.average_score,
            dimension_scores: &result.dimension_scores,
            answers: &result.answers,
            results: result,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvResultsResponse {
    pub message: String,
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Assessment store backed by a remote lsa-api server
pub struct HttpAssessmentStore {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpAssessmentStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.http_client.get(&url).send().await.map_err(unreachable)?;
        decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(unreachable)?;
        decode(response).await
    }

    /// Append the result to the server's CSV file
    pub async fn save_csv_results(&self, payload: &CsvResultsPayload<'_>) -> Result<CsvResultsResponse> {
        self.post_json("/api/save-results", payload).await
    }
}

fn unreachable(e: reqwest::Error) -> Error {
    Error::Persistence(format!("Server unreachable: {}", e))
}

/// Map the response status onto the shared error kinds, then decode the body
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| Error::Persistence(format!("Unreadable server response: {}", e)));
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(error_for_status(status, message))
}

fn error_for_status(status: StatusCode, message: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::BAD_REQUEST => Error::Validation(message),
        _ => Error::Persistence(format!("Server returned {}: {}", status.as_u16(), message)),
    }
}

#[async_trait]
impl AssessmentStore for HttpAssessmentStore {
    async fn save_assessment(&self, assessment: NewAssessment) -> Result<SavedAssessment> {
        self.post_json("/api/assessment", &assessment).await
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<StoredAssessment> {
        self.get_json(&format!("/api/assessment/{}", id)).await
    }

    async fn list_assessments(&self) -> Result<Vec<AssessmentSummary>> {
        self.get_json("/api/assessments").await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/api/users").await
    }
}
