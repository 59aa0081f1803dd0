//! # LSA Common Library
//!
//! Shared code for the leadership self-assessment server and terminal client:
//! - Question and dimension catalog
//! - Scoring engine and recommendation selector
//! - Result assembly and the local result snapshot
//! - Persistence interface and the SQLite store
//! - Configuration loading
//! - Utility functions

pub mod assessment;
pub mod catalog;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod legacy;
pub mod persistence;
pub mod recommendations;
pub mod scoring;
pub mod snapshot;
pub mod time;

pub use assessment::{assemble_result, AssessmentResult};
pub use catalog::{Catalog, Dimension, Question};
pub use error::{Error, Result};
pub use scoring::{compute_average, compute_dimension_scores, Answers, DimensionScores};
