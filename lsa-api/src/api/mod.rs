//! HTTP API handlers for lsa-api

pub mod assessments;
pub mod buildinfo;
pub mod health;
pub mod results;
pub mod scoring;
pub mod users;

pub use assessments::{create_assessment, get_assessment, list_assessments};
pub use buildinfo::get_build_info;
pub use health::{health_routes, index};
pub use results::{get_results, save_results};
pub use scoring::{get_questionnaire, get_recommendations, score_answers};
pub use users::list_users;
