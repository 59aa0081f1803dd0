//! User listing

use axum::{extract::State, Json};
use lsa_common::persistence::{AssessmentStore, User};

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.store.list_users().await?))
}
