//! Handlers for user endpoints.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::api::state::AppState;
use crate::domain::{User, UserDraft};
use crate::error::Result;

/// `POST /user`
///
/// # Errors
///
/// Returns an error if the body cannot be read, validation fails, or storage fails.
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<UserDraft>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(draft) = body?;
    let user = state.user_service.create(draft).await?;
    Ok(Json(user))
}

/// `GET /users`
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.user_service.list_all().await?;
    Ok(Json(users))
}

/// `GET /user/{id}`
///
/// # Errors
///
/// Returns an error if the id is malformed or storage fails.
pub async fn get_one(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Option<User>>> {
    let Path(id) = path?;
    let user = state.user_service.get_by_id(&id).await?;
    Ok(Json(user))
}
