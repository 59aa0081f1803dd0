//! Persistence interface
//!
//! The scoring flow talks to storage only through [`AssessmentStore`]. The
//! server implements it over SQLite (`db::SqliteAssessmentStore`); the terminal
//! client implements it over HTTP. Every save creates a new identity and never
//! updates an existing record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::AssessmentResult;
use crate::scoring::{Answers, DimensionScores};
use crate::Result;

/// Payload of a save request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssessment {
    /// Existing user; an anonymous user is created when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub dimension_scores: DimensionScores,
    /// Assessment timestamp; the store uses the current time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl From<&AssessmentResult> for NewAssessment {
    fn from(result: &AssessmentResult) -> Self {
        Self {
            user_id: None,
            answers: result.answers.clone(),
            dimension_scores: result.dimension_scores.clone(),
            date: Some(result.timestamp),
        }
    }
}

/// Identity and scores of a freshly saved assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAssessment {
    pub assessment_id: i64,
    pub user_id: i64,
    pub average_score: i64,
    pub dimension_scores: DimensionScores,
}

/// A saved assessment read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssessment {
    pub id: i64,
    pub user_id: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub average_score: i64,
    #[serde(default)]
    pub dimension_scores: DimensionScores,
    #[serde(default)]
    pub answers: Answers,
}

/// One row of the assessment list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub id: i64,
    pub user_id: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub average_score: i64,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A person who took one or more assessments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Storage for saved assessments
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Persist answers and dimension scores as a new assessment
    ///
    /// # Errors
    /// * `Error::Validation` - answer outside [1, 5] or score outside [0, 100]
    /// * `Error::NotFound` - `user_id` given but unknown
    /// * `Error::Persistence` - store unreachable or write rejected
    async fn save_assessment(&self, assessment: NewAssessment) -> Result<SavedAssessment>;

    /// Read one assessment back
    ///
    /// Missing dimension scores or answers come back as empty maps.
    ///
    /// # Errors
    /// * `Error::NotFound` - no assessment with this id
    async fn get_assessment_by_id(&self, id: i64) -> Result<StoredAssessment>;

    /// All assessments, newest first
    async fn list_assessments(&self) -> Result<Vec<AssessmentSummary>>;

    /// All users
    async fn list_users(&self) -> Result<Vec<User>>;
}
