//! Scoring engine
//!
//! Maps raw 1-5 answers to a 0-100 percentage per dimension and an overall
//! average. Pure functions: no shared state, safe to call from any number of
//! tasks concurrently.

use std::collections::{BTreeMap, HashSet};

use crate::catalog::{Catalog, Dimension, Question};
use crate::{Error, Result};

/// Question id -> answer (1-5)
pub type Answers = BTreeMap<String, i64>;

/// Dimension id -> percentage (0-100)
pub type DimensionScores = BTreeMap<String, i64>;

/// Lowest allowed answer value
pub const MIN_ANSWER: i64 = 1;

/// Highest allowed answer value
pub const MAX_ANSWER: i64 = 5;

/// Highest possible dimension percentage
pub const MAX_SCORE: i64 = 100;

/// Check that an answer value lies in [1, 5]
pub fn validate_answer(question_id: &str, value: i64) -> Result<()> {
    if (MIN_ANSWER..=MAX_ANSWER).contains(&value) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Answer for {} must be between {} and {}, got {}",
            question_id, MIN_ANSWER, MAX_ANSWER, value
        )))
    }
}

/// Check that a dimension percentage lies in [0, 100]
pub fn validate_score(dimension_id: &str, score: i64) -> Result<()> {
    if (0..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Score for {} must be between 0 and {}, got {}",
            dimension_id, MAX_SCORE, score
        )))
    }
}

/// Range-check posted answers and dimension scores
///
/// Run on anything received from outside before it is stored or averaged.
pub fn validate_submission(answers: &Answers, scores: &DimensionScores) -> Result<()> {
    for (question_id, &answer) in answers {
        validate_answer(question_id, answer)?;
    }
    for (dimension_id, &score) in scores {
        validate_score(dimension_id, score)?;
    }
    Ok(())
}

/// Compute the percentage score of every dimension
///
/// Each dimension is scored over its answered questions only:
/// `round(sum / (answered * 5) * 100)`, rounding half up. A dimension with no
/// answered questions scores 0. Coverage checks ("every question answered")
/// belong to the caller.
///
/// # Errors
/// `Error::Validation` when an answer is outside [1, 5], when an answer names
/// a question that is not in `questions`, or when a question references a
/// dimension missing from `dimensions`.
pub fn compute_dimension_scores(
    answers: &Answers,
    questions: &[Question],
    dimensions: &[Dimension],
) -> Result<DimensionScores> {
    let dimension_ids: HashSet<&str> = dimensions.iter().map(|d| d.id.as_str()).collect();
    for question in questions {
        if !dimension_ids.contains(question.dimension_id.as_str()) {
            return Err(Error::Validation(format!(
                "Question {} references unknown dimension {}",
                question.id, question.dimension_id
            )));
        }
    }

    let question_ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    for (question_id, &value) in answers {
        if !question_ids.contains(question_id.as_str()) {
            return Err(Error::Validation(format!(
                "Answer given for unknown question {}",
                question_id
            )));
        }
        validate_answer(question_id, value)?;
    }

    let mut scores = DimensionScores::new();
    for dimension in dimensions {
        let (sum, answered) = questions
            .iter()
            .filter(|q| q.dimension_id == dimension.id)
            .filter_map(|q| answers.get(&q.id))
            .fold((0i64, 0i64), |(sum, n), &value| (sum + value, n + 1));

        scores.insert(dimension.id.clone(), percentage(sum, answered));
    }

    Ok(scores)
}

/// Score answers against a whole catalog
pub fn score_with_catalog(answers: &Answers, catalog: &Catalog) -> Result<DimensionScores> {
    compute_dimension_scores(answers, catalog.questions(), catalog.dimensions())
}

/// Rounded arithmetic mean of the dimension percentages, 0 when empty
pub fn compute_average(scores: &DimensionScores) -> i64 {
    if scores.is_empty() {
        return 0;
    }
    let total: i64 = scores.values().sum();
    div_round_half_up(total, scores.len() as i64)
}

/// Average computed straight from raw answers, for records saved without
/// dimension scores: `round(sum / (count * 5) * 100)`
pub fn average_from_answers(answers: &Answers) -> i64 {
    let sum: i64 = answers.values().sum();
    percentage(sum, answers.len() as i64)
}

/// `round(sum / (count * 5) * 100)` with exact integer arithmetic
fn percentage(sum: i64, count: i64) -> i64 {
    if count == 0 {
        return 0;
    }
    div_round_half_up(100 * sum, MAX_ANSWER * count)
}

/// `round(numerator / denominator)`, halves rounded up
///
/// denominator must be positive.
pub(crate) fn div_round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

/// Questions of the catalog that have no answer yet, in catalog order
pub fn unanswered_questions<'a>(answers: &Answers, catalog: &'a Catalog) -> Vec<&'a Question> {
    catalog
        .questions()
        .iter()
        .filter(|q| !answers.contains_key(&q.id))
        .collect()
}
