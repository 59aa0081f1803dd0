//! Result assembly
//!
//! Turns a completed answer map into an immutable [`AssessmentResult`]. The
//! timestamp is captured once by the caller and reused for the local snapshot
//! and for any persistence write, so the two never disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::recommendations::{get_recommendations, ScoreBand};
use crate::scoring::{compute_average, score_with_catalog, Answers, DimensionScores};
use crate::Result;

/// Scored output of one questionnaire pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub answers: Answers,
    pub dimension_scores: DimensionScores,
    pub average_score: i64,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

/// Score `answers` against `catalog` and stamp the result with `timestamp`
pub fn assemble_result(
    answers: Answers,
    catalog: &Catalog,
    timestamp: DateTime<Utc>,
) -> Result<AssessmentResult> {
    let dimension_scores = score_with_catalog(&answers, catalog)?;
    let average_score = compute_average(&dimension_scores);

    Ok(AssessmentResult {
        answers,
        dimension_scores,
        average_score,
        timestamp,
    })
}

/// Recommendations for one dimension of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionAdvice {
    pub dimension_id: String,
    pub score: i64,
    pub band: ScoreBand,
    pub recommendations: Vec<&'static str>,
}

impl AssessmentResult {
    /// Per-dimension advice in catalog order
    pub fn advice(&self, catalog: &Catalog) -> Vec<DimensionAdvice> {
        catalog
            .dimensions()
            .iter()
            .map(|dimension| {
                let score = self
                    .dimension_scores
                    .get(&dimension.id)
                    .copied()
                    .unwrap_or(0);
                DimensionAdvice {
                    dimension_id: dimension.id.clone(),
                    score,
                    band: ScoreBand::from_score(score),
                    recommendations: get_recommendations(&dimension.id, score).to_vec(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::TimeZone;

    fn full_answers(value: i64) -> Answers {
        Catalog::standard()
            .questions()
            .iter()
            .map(|q| (q.id.clone(), value))
            .collect()
    }

    #[test]
    fn test_assemble_keeps_timestamp_and_answers() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let answers = full_answers(4);
        let result = assemble_result(answers.clone(), Catalog::standard(), ts).unwrap();

        assert_eq!(result.timestamp, ts);
        assert_eq!(result.answers, answers);
        assert_eq!(result.dimension_scores.len(), 5);
        assert!(result.dimension_scores.values().all(|&s| s == 80));
        assert_eq!(result.average_score, 80);
    }

    #[test]
    fn test_average_matches_dimension_mean() {
        let mut answers = full_answers(3);
        for id in ["q1_1", "q1_2", "q1_3", "q1_4"] {
            answers.insert(id.to_string(), 5);
        }
        let result = assemble_result(answers, Catalog::standard(), Utc::now()).unwrap();
        // 100 + 60 * 4 = 340 / 5 = 68
        assert_eq!(result.dimension_scores["raising_expectations"], 100);
        assert_eq!(result.average_score, 68);
    }

    #[test]
    fn test_invalid_answers_fail_assembly() {
        let mut answers = full_answers(3);
        answers.insert("q2_2".to_string(), 9);
        let err = assemble_result(answers, Catalog::standard(), Utc::now()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_serialized_shape() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let result = assemble_result(full_answers(5), Catalog::standard(), ts).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["averageScore"], 100);
        assert_eq!(json["dimensionScores"]["increasing_urgency"], 100);
        assert_eq!(json["answers"]["q1_1"], 5);
        assert_eq!(json["date"], "2025-01-15T09:00:00Z");
    }

    #[test]
    fn test_advice_follows_bands() {
        let mut answers = full_answers(5);
        for id in ["q5_1", "q5_2", "q5_3", "q5_4"] {
            answers.insert(id.to_string(), 1);
        }
        let result = assemble_result(answers, Catalog::standard(), Utc::now()).unwrap();
        let advice = result.advice(Catalog::standard());

        assert_eq!(advice.len(), 5);
        assert_eq!(advice[0].band, ScoreBand::High);
        let data = advice.iter().find(|a| a.dimension_id == "data_driven_leadership").unwrap();
        assert_eq!(data.score, 20);
        assert_eq!(data.band, ScoreBand::Low);
        assert_eq!(data.recommendations.len(), 4);
    }
}
