//! Subcommand implementations
//!
//! A result is always shown and cached locally before anything is sent to the
//! server, so a failed save never loses it.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use lsa_common::catalog::Catalog;
use lsa_common::persistence::{AssessmentStore, NewAssessment, SavedAssessment};
use lsa_common::scoring::{unanswered_questions, Answers};
use lsa_common::snapshot::SnapshotStore;
use lsa_common::{assemble_result, time, AssessmentResult};
use tracing::{info, warn};

use crate::cli::Persist;
use crate::client::{CsvResultsPayload, HttpAssessmentStore};
use crate::questionnaire::run_questionnaire;
use crate::report;

/// Everything a subcommand needs
pub(crate) struct Context {
    pub(crate) catalog: &'static Catalog,
    pub(crate) snapshot: SnapshotStore,
    pub(crate) server_url: String,
}

impl Context {
    fn store(&self) -> Result<HttpAssessmentStore> {
        Ok(HttpAssessmentStore::new(&self.server_url)?)
    }
}

#[derive(Debug)]
pub(crate) enum SaveOutcome {
    Saved(SavedAssessment),
    NotSaved(String),
}

/// Save through any store, turning every failure into "not saved"
pub(crate) async fn save_to_store(store: &dyn AssessmentStore, result: &AssessmentResult) -> SaveOutcome {
    match store.save_assessment(NewAssessment::from(result)).await {
        Ok(saved) => SaveOutcome::Saved(saved),
        Err(e) => {
            warn!("Assessment save failed: {}", e);
            SaveOutcome::NotSaved(e.to_string())
        }
    }
}

pub(crate) async fn take(ctx: &Context, persist: &Persist) -> Result<()> {
    let answers = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        run_questionnaire(ctx.catalog, &mut input, &mut output)?
    };
    finish(ctx, answers, persist).await
}

pub(crate) async fn score_file(ctx: &Context, path: &Path, persist: &Persist) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let answers: Answers = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object of answers", path.display()))?;

    let missing: Vec<&str> = unanswered_questions(&answers, ctx.catalog)
        .into_iter()
        .map(|q| q.id.as_str())
        .collect();
    if !missing.is_empty() {
        bail!("Assessment incomplete, unanswered: {}", missing.join(", "));
    }

    finish(ctx, answers, persist).await
}

/// Score, cache, display, then persist
async fn finish(ctx: &Context, answers: Answers, persist: &Persist) -> Result<()> {
    let result = assemble_result(answers, ctx.catalog, time::now())?;

    if let Err(e) = ctx.snapshot.save(&result) {
        warn!("Could not cache result at {}: {}", ctx.snapshot.path().display(), e);
    }

    let mut stdout = io::stdout();
    writeln!(stdout)?;
    write!(stdout, "{}", report::render_result(&result, ctx.catalog))?;

    if !persist.save && !persist.csv {
        return Ok(());
    }

    let store = ctx.store()?;
    writeln!(stdout)?;

    if persist.save {
        match save_to_store(&store, &result).await {
            SaveOutcome::Saved(saved) => {
                info!("Saved assessment {}", saved.assessment_id);
                writeln!(stdout, "Saved as assessment #{}.", saved.assessment_id)?;
            }
            SaveOutcome::NotSaved(reason) => {
                eprintln!("Scored but not saved: {}", reason);
            }
        }
    }

    if persist.csv {
        let payload = CsvResultsPayload::new(&result, persist.name.as_deref());
        match store.save_csv_results(&payload).await {
            Ok(response) => writeln!(stdout, "{} ({})", response.message, response.file_path)?,
            Err(e) => {
                warn!("CSV save failed: {}", e);
                eprintln!("Scored but not written to the results file: {}", e);
            }
        }
    }

    Ok(())
}

pub(crate) fn show(ctx: &Context) -> Result<()> {
    match ctx.snapshot.load()? {
        Some(result) => print!("{}", report::render_result(&result, ctx.catalog)),
        None => println!("No result saved on this machine. Run `lsa take` first."),
    }
    Ok(())
}

pub(crate) fn reset(ctx: &Context) -> Result<()> {
    ctx.snapshot.clear()?;
    println!("Local result cleared.");
    Ok(())
}

pub(crate) async fn history(ctx: &Context) -> Result<()> {
    let assessments = ctx.store()?.list_assessments().await?;
    print!("{}", report::render_history(&assessments));
    Ok(())
}

pub(crate) async fn users(ctx: &Context) -> Result<()> {
    let users = ctx.store()?.list_users().await?;
    print!("{}", report::render_users(&users));
    Ok(())
}

pub(crate) async fn view(ctx: &Context, id: i64) -> Result<()> {
    let assessment = ctx.store()?.get_assessment_by_id(id).await?;
    print!("{}", report::render_stored(&assessment, ctx.catalog));
    Ok(())
}

pub(crate) fn questions(ctx: &Context) -> Result<()> {
    print!("{}", report::render_catalog(ctx.catalog));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lsa_common::persistence::{AssessmentSummary, StoredAssessment, User};
    use lsa_common::Error;

    struct UnreachableStore;

    #[async_trait]
    impl AssessmentStore for UnreachableStore {
        async fn save_assessment(&self, _: NewAssessment) -> lsa_common::Result<SavedAssessment> {
            Err(Error::Persistence("connection refused".to_string()))
        }
        async fn get_assessment_by_id(&self, id: i64) -> lsa_common::Result<StoredAssessment> {
            Err(Error::NotFound(format!("Assessment {}", id)))
        }
        async fn list_assessments(&self) -> lsa_common::Result<Vec<AssessmentSummary>> {
            Ok(Vec::new())
        }
        async fn list_users(&self) -> lsa_common::Result<Vec<User>> {
            Ok(Vec::new())
        }
    }

    struct RecordingStore;

    #[async_trait]
    impl AssessmentStore for RecordingStore {
        async fn save_assessment(&self, a: NewAssessment) -> lsa_common::Result<SavedAssessment> {
            Ok(SavedAssessment {
                assessment_id: 1,
                user_id: 1,
                average_score: lsa_common::compute_average(&a.dimension_scores),
                dimension_scores: a.dimension_scores,
            })
        }
        async fn get_assessment_by_id(&self, id: i64) -> lsa_common::Result<StoredAssessment> {
            Err(Error::NotFound(format!("Assessment {}", id)))
        }
        async fn list_assessments(&self) -> lsa_common::Result<Vec<AssessmentSummary>> {
            Ok(Vec::new())
        }
        async fn list_users(&self) -> lsa_common::Result<Vec<User>> {
            Ok(Vec::new())
        }
    }

    fn sample_result() -> AssessmentResult {
        let answers: Answers = Catalog::standard()
            .questions()
            .iter()
            .map(|q| (q.id.clone(), 3))
            .collect();
        assemble_result(answers, Catalog::standard(), time::now()).unwrap()
    }

    #[tokio::test]
    async fn test_failed_save_reports_not_saved() {
        let result = sample_result();
        match save_to_store(&UnreachableStore, &result).await {
            SaveOutcome::NotSaved(reason) => assert!(reason.contains("connection refused")),
            other => panic!("expected NotSaved, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_successful_save_keeps_scores() {
        let result = sample_result();
        match save_to_store(&RecordingStore, &result).await {
            SaveOutcome::Saved(saved) => {
                assert_eq!(saved.average_score, result.average_score);
                assert_eq!(saved.dimension_scores, result.dimension_scores);
            }
            other => panic!("expected Saved, got {:?}", other),
        }
    }

    #[test]
    fn test_show_and_reset_use_snapshot() {
        let dir = tempfile::TempDir::new().unwrap();
        let ctx = Context {
            catalog: Catalog::standard(),
            snapshot: SnapshotStore::new(dir.path(), "leadershipResults"),
            server_url: "http://127.0.0.1:9".to_string(),
        };

        ctx.snapshot.save(&sample_result()).unwrap();
        show(&ctx).unwrap();
        reset(&ctx).unwrap();
        assert!(ctx.snapshot.load().unwrap().is_none());
        reset(&ctx).unwrap();
    }

    #[tokio::test]
    async fn test_incomplete_answer_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"q1_1": 4}"#).unwrap();

        let ctx = Context {
            catalog: Catalog::standard(),
            snapshot: SnapshotStore::new(dir.path(), "leadershipResults"),
            server_url: "http://127.0.0.1:9".to_string(),
        };
        let persist = Persist {
            save: false,
            csv: false,
            name: None,
        };

        let err = score_file(&ctx, &path, &persist).await.unwrap_err();
        assert!(err.to_string().contains("q5_4"));
        assert!(ctx.snapshot.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_answer_file_is_cached_without_server() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("answers.json");
        let answers = serde_json::to_string(&sample_result().answers).unwrap();
        std::fs::write(&path, answers).unwrap();

        let ctx = Context {
            catalog: Catalog::standard(),
            snapshot: SnapshotStore::new(dir.path(), "leadershipResults"),
            server_url: "http://127.0.0.1:9".to_string(),
        };
        let persist = Persist {
            save: true,
            csv: false,
            name: None,
        };

        score_file(&ctx, &path, &persist).await.unwrap();
        let cached = ctx.snapshot.load().unwrap().unwrap();
        assert_eq!(cached.average_score, 60);
    }
}
