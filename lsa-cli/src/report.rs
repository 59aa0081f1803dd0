//! Text rendering of results, stored assessments and the assessment list

use std::fmt::{self, Write};

use lsa_common::catalog::Catalog;
use lsa_common::persistence::{AssessmentSummary, StoredAssessment, User};
use lsa_common::recommendations::{get_recommendations, ScoreBand};
use lsa_common::scoring::DimensionScores;
use lsa_common::time::format_short_date;
use lsa_common::AssessmentResult;

/// Width of a full (100%) bar
pub const BAR_WIDTH: usize = 40;

/// Bar for a percentage, rounded to the nearest cell
pub fn bar(score: i64) -> String {
    let score = score.clamp(0, 100) as usize;
    let filled = (score * BAR_WIDTH + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Run a writer against a fresh `String`
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // fmt::Write for String never returns an error
    let _ = write(&mut out);
    out
}

fn write_chart(out: &mut String, scores: &DimensionScores, catalog: &Catalog) -> fmt::Result {
    let label_width = catalog
        .dimensions()
        .iter()
        .map(|d| d.headline().len())
        .max()
        .unwrap_or(0);

    for dimension in catalog.dimensions() {
        let label = dimension.headline();
        match scores.get(&dimension.id) {
            Some(&score) => writeln!(
                out,
                "  {:<width$}  {} {:>3}%",
                label,
                bar(score),
                score,
                width = label_width
            )?,
            None => writeln!(
                out,
                "  {:<width$}  {:<bar$}  n/a",
                label,
                "",
                width = label_width,
                bar = BAR_WIDTH
            )?,
        }
    }
    Ok(())
}

/// Full report for a freshly scored result: chart, advice and reading list
pub fn render_result(result: &AssessmentResult, catalog: &Catalog) -> String {
    render(|out| {
        writeln!(out, "Leadership Self-Assessment Results")?;
        writeln!(out, "Date: {}", format_short_date(&result.timestamp))?;
        writeln!(
            out,
            "Overall score: {}% ({})",
            result.average_score,
            ScoreBand::from_score(result.average_score)
        )?;
        writeln!(out)?;
        write_chart(out, &result.dimension_scores, catalog)?;

        for advice in result.advice(catalog) {
            let Some(dimension) = catalog.dimension(&advice.dimension_id) else {
                continue;
            };
            writeln!(out)?;
            writeln!(out, "{} - {}% ({})", dimension.name, advice.score, advice.band)?;
            writeln!(out, "  {}", dimension.description)?;
            writeln!(out, "  Recommendations:")?;
            for item in &advice.recommendations {
                writeln!(out, "    - {}", item)?;
            }
            if !dimension.resources.is_empty() {
                writeln!(out, "  Resources:")?;
                for resource in &dimension.resources {
                    writeln!(out, "    * {}", resource)?;
                }
            }
        }
        Ok(())
    })
}

/// Detail view of an assessment read back from the server
pub fn render_stored(assessment: &StoredAssessment, catalog: &Catalog) -> String {
    render(|out| {
        let date = assessment
            .date
            .as_ref()
            .map(format_short_date)
            .unwrap_or_else(|| "unknown date".to_string());
        writeln!(out, "Assessment #{} ({})", assessment.id, date)?;
        writeln!(out, "Overall score: {}%", assessment.average_score)?;

        if assessment.dimension_scores.is_empty() {
            writeln!(out, "No dimension scores recorded.")?;
        } else {
            writeln!(out)?;
            write_chart(out, &assessment.dimension_scores, catalog)?;
            for (dimension_id, &score) in &assessment.dimension_scores {
                if catalog.dimension(dimension_id).is_none() {
                    writeln!(out, "  {}: {}%", dimension_id, score)?;
                }
            }
            writeln!(out)?;
            for (dimension_id, &score) in &assessment.dimension_scores {
                let name = catalog
                    .dimension(dimension_id)
                    .map(|d| d.headline())
                    .unwrap_or(dimension_id.as_str());
                writeln!(out, "{} ({}):", name, ScoreBand::from_score(score))?;
                for item in get_recommendations(dimension_id, score) {
                    writeln!(out, "    - {}", item)?;
                }
            }
        }

        if assessment.answers.is_empty() {
            writeln!(out, "No answers recorded.")?;
        } else {
            writeln!(out)?;
            writeln!(out, "Answers:")?;
            for (question_id, answer) in &assessment.answers {
                let text = catalog
                    .question(question_id)
                    .map(|q| q.text.as_str())
                    .unwrap_or("(question not in catalog)");
                writeln!(out, "  {:<5} {}  {}", question_id, answer, text)?;
            }
        }
        Ok(())
    })
}

/// Table of saved assessments, newest first as the server returns them
pub fn render_history(assessments: &[AssessmentSummary]) -> String {
    if assessments.is_empty() {
        return "No saved assessments.\n".to_string();
    }

    render(|out| {
        writeln!(out, "{:>5}  {:<10}  {:>7}  {}", "ID", "Date", "Average", "User")?;
        for summary in assessments {
            let date = summary
                .date
                .as_ref()
                .map(format_short_date)
                .unwrap_or_default();
            let user = match (&summary.name, &summary.email) {
                (Some(name), Some(email)) => format!("{} <{}>", name, email),
                (Some(name), None) => name.clone(),
                (None, Some(email)) => email.clone(),
                (None, None) => "-".to_string(),
            };
            writeln!(
                out,
                "{:>5}  {:<10}  {:>6}%  {}",
                summary.id, date, summary.average_score, user
            )?;
        }
        Ok(())
    })
}

pub fn render_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users.\n".to_string();
    }

    render(|out| {
        for user in users {
            writeln!(
                out,
                "{:>5}  {}  {}",
                user.id,
                user.name.as_deref().unwrap_or("-"),
                user.email.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    })
}

/// Catalog listing grouped by dimension
pub fn render_catalog(catalog: &Catalog) -> String {
    render(|out| {
        for dimension in catalog.dimensions() {
            writeln!(out, "{} [{}]", dimension.name, dimension.id)?;
            for question in catalog.questions_for(&dimension.id) {
                writeln!(out, "  {:<5} {}", question.id, question.text)?;
            }
            writeln!(out)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lsa_common::assemble_result;
    use lsa_common::scoring::Answers;

    fn result_with(value: i64) -> AssessmentResult {
        let answers: Answers = Catalog::standard()
            .questions()
            .iter()
            .map(|q| (q.id.clone(), value))
            .collect();
        let ts = Utc.with_ymd_and_hms(2025, 6, 9, 10, 0, 0).unwrap();
        assemble_result(answers, Catalog::standard(), ts).unwrap()
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(0), ".".repeat(BAR_WIDTH));
        assert_eq!(bar(100), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(50).matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(bar(150), "#".repeat(BAR_WIDTH));
    }

    #[test]
    fn test_result_report_sections() {
        let report = render_result(&result_with(5), Catalog::standard());

        assert!(report.contains("Date: 6/9/2025"));
        assert!(report.contains("Overall score: 100% (high)"));
        assert!(report.contains("Data-Driven Leadership"));
        assert_eq!(report.matches("Recommendations:").count(), 5);
        assert_eq!(report.matches("Resources:").count(), 5);
        assert!(report.contains(&"#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_low_result_uses_low_band() {
        let report = render_result(&result_with(1), Catalog::standard());
        assert!(report.contains("Overall score: 20% (low)"));
    }

    #[test]
    fn test_stored_report_with_partial_data() {
        let stored = StoredAssessment {
            id: 4,
            user_id: None,
            date: None,
            average_score: 55,
            dimension_scores: DimensionScores::new(),
            answers: Default::default(),
        };
        let report = render_stored(&stored, Catalog::standard());
        assert!(report.contains("Assessment #4 (unknown date)"));
        assert!(report.contains("No dimension scores recorded."));
        assert!(report.contains("No answers recorded."));
    }

    #[test]
    fn test_history_table() {
        assert_eq!(render_history(&[]), "No saved assessments.\n");

        let rows = vec![AssessmentSummary {
            id: 12,
            user_id: Some(3),
            date: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            average_score: 64,
            name: Some("Anonymous".to_string()),
            email: Some("anonymous_x@example.com".to_string()),
        }];
        let table = render_history(&rows);
        assert!(table.contains("2/1/2024"));
        assert!(table.contains("64%"));
        assert!(table.contains("Anonymous <anonymous_x@example.com>"));
    }

    #[test]
    fn test_catalog_listing() {
        let listing = render_catalog(Catalog::standard());
        assert!(listing.contains("[raising_expectations]"));
        assert!(listing.contains("q5_4"));
    }
}
