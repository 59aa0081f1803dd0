//! SQLite-backed assessment store
//!
//! One assessment is spread over four tables: `users`, `assessments`,
//! `dimension_scores` and `question_answers`. A save writes all of them in a
//! single transaction. Reads tolerate partially populated records and apply
//! the legacy score rescale.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::legacy::rescale_stored_score;
use crate::persistence::{
    AssessmentStore, AssessmentSummary, NewAssessment, SavedAssessment, StoredAssessment, User,
};
use crate::scoring::{
    average_from_answers, compute_average, validate_submission, Answers, DimensionScores,
};
use crate::time::{self, parse_db_timestamp};
use crate::{Error, Result};

/// Name given to users created for saves without a user id
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Dimension recorded for answers to questions outside the catalog
pub const UNKNOWN_DIMENSION: &str = "unknown";

/// Assessment store over an SQLite pool
#[derive(Clone)]
pub struct SqliteAssessmentStore {
    pool: SqlitePool,
    catalog: &'static Catalog,
}

impl SqliteAssessmentStore {
    pub fn new(pool: SqlitePool, catalog: &'static Catalog) -> Self {
        Self { pool, catalog }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn load_dimension_scores(&self, assessment_id: i64) -> Result<DimensionScores> {
        // REAL so fractional legacy scores (3.5) decode alongside integer rows
        let rows: Vec<(Option<String>, Option<f64>)> = sqlx::query_as(
            "SELECT dimension, CAST(score AS REAL) FROM dimension_scores WHERE assessment_id = ? ORDER BY id",
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(dimension, score)| Some((dimension?, rescale_stored_score(score?))))
            .collect())
    }

    async fn load_answers(&self, assessment_id: i64) -> Result<Answers> {
        let rows: Vec<(Option<String>, Option<i64>)> = sqlx::query_as(
            "SELECT question_id, answer FROM question_answers WHERE assessment_id = ? ORDER BY id",
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(question_id, answer)| Some((question_id?, answer?)))
            .collect())
    }

    fn dimension_of(&self, question_id: &str) -> &str {
        self.catalog
            .question(question_id)
            .map(|q| q.dimension_id.as_str())
            .unwrap_or(UNKNOWN_DIMENSION)
    }
}

/// Reject values the scoring engine could never have produced
fn validate_new_assessment(assessment: &NewAssessment) -> Result<()> {
    validate_submission(&assessment.answers, &assessment.dimension_scores)
}

/// Average used when saving: dimension mean, else raw answer mean, else 0
fn saved_average(assessment: &NewAssessment) -> i64 {
    if !assessment.dimension_scores.is_empty() {
        compute_average(&assessment.dimension_scores)
    } else {
        average_from_answers(&assessment.answers)
    }
}

fn storage_error(action: &'static str) -> impl Fn(sqlx::Error) -> Error {
    move |e| Error::Persistence(format!("Failed to {}: {}", action, e))
}

fn parse_optional_timestamp(value: Option<String>, assessment_id: i64) -> Option<chrono::DateTime<chrono::Utc>> {
    let value = value?;
    match parse_db_timestamp(&value) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!("Assessment {} has an unreadable date: {}", assessment_id, e);
            None
        }
    }
}

#[async_trait]
impl AssessmentStore for SqliteAssessmentStore {
    async fn save_assessment(&self, assessment: NewAssessment) -> Result<SavedAssessment> {
        validate_new_assessment(&assessment)?;

        let average_score = saved_average(&assessment);
        let date = assessment.date.unwrap_or_else(time::now).to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("begin transaction"))?;

        let user_id = match assessment.user_id {
            Some(id) => {
                let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(storage_error("look up user"))?;
                existing.ok_or_else(|| Error::NotFound(format!("User {}", id)))?
            }
            None => {
                let email = format!("anonymous_{}@example.com", Uuid::new_v4().simple());
                sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
                    .bind(ANONYMOUS_NAME)
                    .bind(&email)
                    .execute(&mut *tx)
                    .await
                    .map_err(storage_error("create anonymous user"))?
                    .last_insert_rowid()
            }
        };

        let assessment_id = sqlx::query(
            "INSERT INTO assessments (user_id, date, average_score) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(&date)
        .bind(average_score as f64)
        .execute(&mut *tx)
        .await
        .map_err(storage_error("insert assessment"))?
        .last_insert_rowid();

        for (question_id, &answer) in &assessment.answers {
            sqlx::query(
                "INSERT INTO question_answers (assessment_id, question_id, dimension, answer) VALUES (?, ?, ?, ?)",
            )
            .bind(assessment_id)
            .bind(question_id)
            .bind(self.dimension_of(question_id))
            .bind(answer)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("insert answer"))?;
        }

        for (dimension, &score) in &assessment.dimension_scores {
            sqlx::query(
                "INSERT INTO dimension_scores (assessment_id, dimension, score) VALUES (?, ?, ?)",
            )
            .bind(assessment_id)
            .bind(dimension)
            .bind(score)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("insert dimension score"))?;
        }

        tx.commit().await.map_err(storage_error("commit assessment"))?;

        info!(
            "Saved assessment {} for user {} with average score {}%",
            assessment_id, user_id, average_score
        );

        Ok(SavedAssessment {
            assessment_id,
            user_id,
            average_score,
            dimension_scores: assessment.dimension_scores,
        })
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<StoredAssessment> {
        let row = sqlx::query("SELECT id, user_id, date, average_score FROM assessments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("read assessment"))?
            .ok_or_else(|| Error::NotFound(format!("Assessment {}", id)))?;

        let user_id: Option<i64> = row.try_get("user_id").map_err(storage_error("decode user_id"))?;
        let date: Option<String> = row.try_get("date").map_err(storage_error("decode date"))?;
        let average: Option<f64> = row
            .try_get("average_score")
            .map_err(storage_error("decode average_score"))?;

        let dimension_scores = match self.load_dimension_scores(id).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Dimension scores unavailable for assessment {}: {}", id, e);
                DimensionScores::new()
            }
        };

        let answers = match self.load_answers(id).await {
            Ok(answers) => answers,
            Err(e) => {
                warn!("Answers unavailable for assessment {}: {}", id, e);
                Answers::new()
            }
        };

        debug!(
            "Loaded assessment {} ({} dimension scores, {} answers)",
            id,
            dimension_scores.len(),
            answers.len()
        );

        Ok(StoredAssessment {
            id,
            user_id,
            date: parse_optional_timestamp(date, id),
            average_score: average.map(rescale_stored_score).unwrap_or(0),
            dimension_scores,
            answers,
        })
    }

    async fn list_assessments(&self) -> Result<Vec<AssessmentSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.user_id, a.date, a.average_score, u.name, u.email
            FROM assessments a
            LEFT JOIN users u ON a.user_id = u.id
            ORDER BY a.date DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list assessments"))?;

        rows.into_iter()
            .map(|row| {
                let id: i64 = row.try_get("id").map_err(storage_error("decode id"))?;
                let date: Option<String> = row.try_get("date").map_err(storage_error("decode date"))?;
                let average: Option<f64> = row
                    .try_get("average_score")
                    .map_err(storage_error("decode average_score"))?;

                Ok(AssessmentSummary {
                    id,
                    user_id: row.try_get("user_id").map_err(storage_error("decode user_id"))?,
                    date: parse_optional_timestamp(date, id),
                    average_score: average.map(rescale_stored_score).unwrap_or(0),
                    name: row.try_get("name").map_err(storage_error("decode name"))?,
                    email: row.try_get("email").map_err(storage_error("decode email"))?,
                })
            })
            .collect()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows: Vec<(i64, Option<String>, Option<String>, Option<String>)> =
            sqlx::query_as("SELECT id, name, email, created_at FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error("list users"))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, created_at)| User {
                id,
                name,
                email,
                created_at: created_at.and_then(|s| parse_db_timestamp(&s).ok()),
            })
            .collect())
    }
}
