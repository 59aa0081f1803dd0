//! Database schema and the SQLite assessment store

pub mod assessments;
pub mod init;

pub use assessments::SqliteAssessmentStore;
pub use init::init_database;
