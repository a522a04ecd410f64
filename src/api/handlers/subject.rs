//! Handlers for subject endpoints.
//!
//! | Method   | Path                     | Response |
//! |----------|--------------------------|----------|
//! | `POST`   | `/subject`               | created subject (200) |
//! | `GET`    | `/subjects`              | every subject |
//! | `GET`    | `/subject/{id}`          | subject or `null` |
//! | `PUT`    | `/subject/{id}`          | update acknowledgement |
//! | `DELETE` | `/subject/{id}`          | delete acknowledgement |
//! | `GET`    | `/subject/{id}/students` | `[student]` or `[]` |

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::api::state::AppState;
use crate::domain::{DeleteResult, Subject, SubjectDraft, SubjectPatch, UpdateResult, User};
use crate::error::Result;

/// `POST /subject`
///
/// # Errors
///
/// Returns an error if the body cannot be read, validation fails, or storage fails.
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<SubjectDraft>, JsonRejection>,
) -> Result<Json<Subject>> {
    let Json(draft) = body?;
    let subject = state.subject_service.create(draft).await?;
    Ok(Json(subject))
}

/// `GET /subjects`
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Subject>>> {
    let subjects = state.subject_service.list_all().await?;
    Ok(Json(subjects))
}

/// `GET /subject/{id}`
///
/// # Errors
///
/// Returns an error if the id is malformed or storage fails.
pub async fn get_one(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Option<Subject>>> {
    let Path(id) = path?;
    let subject = state.subject_service.get_by_id(&id).await?;
    Ok(Json(subject))
}

/// `PUT /subject/{id}`
///
/// # Errors
///
/// Returns an error if the id or body is malformed, or storage fails.
pub async fn update(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<SubjectPatch>, JsonRejection>,
) -> Result<Json<UpdateResult>> {
    let Path(id) = path?;
    let Json(patch) = body?;
    let ack = state.subject_service.update_by_id(&id, patch).await?;
    Ok(Json(ack))
}

/// `DELETE /subject/{id}`
///
/// # Errors
///
/// Returns an error if the id is malformed or storage fails.
pub async fn delete(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResult>> {
    let Path(id) = path?;
    let ack = state.subject_service.delete_by_id(&id).await?;
    Ok(Json(ack))
}

/// `GET /subject/{id}/students`
///
/// # Errors
///
/// Returns an error if the id is malformed or storage fails.
pub async fn students(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Option<User>>>> {
    let Path(id) = path?;
    let students = state.subject_service.students(&id).await?;
    Ok(Json(students))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{DocumentId, UserDraft};
    use crate::error::AppError;
    use crate::storage::memory::MemoryStorage;
    use std::sync::Arc;

    fn create_test_app_state() -> AppState {
        AppState::new(
            Arc::new(AppConfig::default()),
            Arc::new(MemoryStorage::new()),
        )
    }

    fn draft(alumni: DocumentId) -> SubjectDraft {
        SubjectDraft {
            name: Some("Algebra".to_string()),
            teacher: Some("Ms. Noether".to_string()),
            alumni: Some(alumni.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let state = create_test_app_state();

        let Json(created) = create(State(state.clone()), Ok(Json(draft(DocumentId::generate()))))
            .await
            .unwrap();

        let Json(all) = list(State(state)).await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_get_missing_is_null() {
        let state = create_test_app_state();

        let Json(found) = get_one(State(state), Ok(Path(DocumentId::generate().to_string())))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_malformed_fails() {
        let state = create_test_app_state();

        let result = get_one(State(state), Ok(Path("abc".to_string()))).await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let state = create_test_app_state();
        let Json(created) = create(State(state.clone()), Ok(Json(draft(DocumentId::generate()))))
            .await
            .unwrap();
        let id = created.id.to_string();

        let patch = SubjectPatch {
            teacher: Some("Mr. Hilbert".to_string()),
            ..Default::default()
        };
        let Json(ack) = update(State(state.clone()), Ok(Path(id.clone())), Ok(Json(patch)))
            .await
            .unwrap();
        assert_eq!(ack, UpdateResult::new(1, 1));

        let Json(ack) = delete(State(state.clone()), Ok(Path(id.clone())))
            .await
            .unwrap();
        assert_eq!(ack, DeleteResult::new(1));

        let Json(found) = get_one(State(state), Ok(Path(id))).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_students() {
        let state = create_test_app_state();
        let student = state
            .user_service
            .create(UserDraft {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
            })
            .await
            .unwrap();

        let Json(created) = create(State(state.clone()), Ok(Json(draft(student.id))))
            .await
            .unwrap();

        let Json(found) = students(State(state.clone()), Ok(Path(created.id.to_string())))
            .await
            .unwrap();
        assert_eq!(found, vec![Some(student)]);

        let Json(found) = students(State(state), Ok(Path(DocumentId::generate().to_string())))
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
