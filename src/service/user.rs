//! User service.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{User, UserDraft};
use crate::error::{AppError, Result};
use crate::service::{observe, parse_id};
use crate::storage::traits::Storage;

/// Service for the user documents subjects refer to.
pub struct UserService {
    /// Storage backend.
    storage: Arc<dyn Storage>,
}

impl UserService {
    /// Create a new user service.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Validate and persist a new user.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is missing, or a
    /// storage error if the write fails.
    pub async fn create(&self, draft: UserDraft) -> Result<User> {
        observe("create_user", async {
            let user = draft.validate()?;
            let created = self.storage.insert_user(user).await?;
            debug!(id = %created.id, "User created");
            Ok::<_, AppError>(created)
        })
        .await
    }

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        observe("list_users", async {
            Ok::<_, AppError>(self.storage.find_users().await?)
        })
        .await
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed or storage fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        observe("get_user", async {
            let id = parse_id::<User>(id)?;
            Ok::<_, AppError>(self.storage.find_user(id).await?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::memory::MemoryStorage;

    fn create_test_service() -> UserService {
        UserService::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = create_test_service();
        let created = service
            .create(UserDraft {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
            })
            .await
            .unwrap();

        let found = service.get_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(found, Some(created.clone()));
        assert_eq!(service.list_all().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_create_invalid() {
        let service = create_test_service();
        let result = service.create(UserDraft::default()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_malformed_id() {
        let service = create_test_service();
        let err = service.get_by_id("nope").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cast to DocumentId failed for value \"nope\" (type string) at path \"_id\" for model \"User\""
        );
    }
}
