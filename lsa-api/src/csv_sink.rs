//! Append-only CSV results file
//!
//! One header line written when the file is created, then one line per saved
//! result. Columns are fixed; values are never quoted, so separators inside a
//! field are rewritten before the line is joined.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lsa_common::catalog::Catalog;
use lsa_common::scoring::{Answers, DimensionScores};
use lsa_common::time::format_short_date;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::ApiResult;

/// Default manager name when the request carries none
pub const ANONYMOUS_MANAGER: &str = "Anonymous";

/// Rendered for a dimension missing from the posted scores
pub const MISSING_SCORE: &str = "N/A";

/// One result line, borrowed from the request body
#[derive(Debug)]
pub struct CsvEntry<'a> {
    pub manager_name: Option<&'a str>,
    pub date: DateTime<Utc>,
    pub average_score: i64,
    pub dimension_scores: &'a DimensionScores,
    pub answers: &'a Answers,
}

/// Header line (without trailing newline)
pub fn csv_header(catalog: &Catalog) -> String {
    let mut columns = vec!["Manager Name", "Assessment Date", "Average Score"];
    columns.extend(catalog.dimensions().iter().map(|d| d.headline()));
    columns.push("Question Answers");
    columns.join(",")
}

/// Manager name with field and record separators replaced by spaces
fn sanitize_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.replace([',', '\n', '\r'], " "),
        _ => ANONYMOUS_MANAGER.to_string(),
    }
}

/// Result line (without trailing newline)
pub fn format_csv_line(entry: &CsvEntry<'_>, catalog: &Catalog) -> String {
    let mut fields = Vec::with_capacity(catalog.dimensions().len() + 4);
    fields.push(sanitize_name(entry.manager_name));
    fields.push(format_short_date(&entry.date));
    fields.push(format!("{}%", entry.average_score));

    for dimension in catalog.dimensions() {
        fields.push(match entry.dimension_scores.get(&dimension.id) {
            Some(score) => format!("{}%", score),
            None => MISSING_SCORE.to_string(),
        });
    }

    // BTreeMap<String, i64> always serializes
    let answers = serde_json::to_string(entry.answers).unwrap_or_else(|_| "{}".to_string());
    fields.push(answers.replace(',', ";"));

    fields.join(",")
}

/// Results file shared by all request handlers
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    catalog: &'static Catalog,
    write_lock: Mutex<()>,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>, catalog: &'static Catalog) -> Self {
        Self {
            path: path.into(),
            catalog,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with its header if it does not exist yet
    pub async fn ensure_file_exists(&self) -> ApiResult<()> {
        let _guard = self.write_lock.lock().await;
        self.create_if_missing().await
    }

    async fn create_if_missing(&self) -> ApiResult<()> {
        if tokio::fs::try_exists(&self.path).await? {
            let metadata = tokio::fs::metadata(&self.path).await?;
            if metadata.permissions().readonly() {
                warn!("CSV file {} is not writable", self.path.display());
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, format!("{}\n", csv_header(self.catalog))).await?;
        info!("Created CSV results file: {}", self.path.display());
        Ok(())
    }

    /// Append one result line
    ///
    /// Appends are serialized so concurrent saves never interleave.
    pub async fn append(&self, entry: &CsvEntry<'_>) -> ApiResult<()> {
        let line = format_csv_line(entry, self.catalog);

        let _guard = self.write_lock.lock().await;
        self.create_if_missing().await?;

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", line).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Whole file contents, header included
    pub async fn read_all(&self) -> ApiResult<String> {
        self.ensure_file_exists().await?;
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}
