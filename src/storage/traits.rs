//! Storage trait definitions.
//!
//! These traits define the document store client the service layer talks to,
//! enabling swapping between backends (and test doubles) without changing
//! business logic.

use async_trait::async_trait;

use crate::domain::{
    DeleteResult, DocumentId, NewSubject, NewUser, PopulatedSubject, Subject, SubjectChanges,
    UpdateResult, User,
};
use crate::error::StorageResult;

/// Subject collection operations.
#[async_trait]
pub trait SubjectStorage: Send + Sync {
    /// Persist a validated subject, assigning its identifier.
    async fn insert_subject(&self, subject: NewSubject) -> StorageResult<Subject>;

    /// List every subject in insertion order.
    async fn find_subjects(&self) -> StorageResult<Vec<Subject>>;

    /// Get a subject by id.
    async fn find_subject(&self, id: DocumentId) -> StorageResult<Option<Subject>>;

    /// Apply field changes to the subject matching `id`.
    ///
    /// Returns an acknowledgement, never the updated record.
    async fn update_subject(
        &self,
        id: DocumentId,
        changes: &SubjectChanges,
    ) -> StorageResult<UpdateResult>;

    /// Delete the subject matching `id`.
    async fn delete_subject(&self, id: DocumentId) -> StorageResult<DeleteResult>;
}

/// User collection operations.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Persist a validated user, assigning its identifier.
    async fn insert_user(&self, user: NewUser) -> StorageResult<User>;

    /// List every user in insertion order.
    async fn find_users(&self) -> StorageResult<Vec<User>>;

    /// Get a user by id.
    async fn find_user(&self, id: DocumentId) -> StorageResult<Option<User>>;
}

/// Relation expansion.
///
/// Replaces stored reference identifiers with the referenced documents at
/// read time.
#[async_trait]
pub trait RelationExpansion: Send + Sync {
    /// Get a subject with its `alumni` reference expanded.
    ///
    /// Returns `None` if the subject does not exist. A dangling reference
    /// expands to `alumni: None`.
    async fn find_subject_populated(
        &self,
        id: DocumentId,
    ) -> StorageResult<Option<PopulatedSubject>>;
}

/// Combined document store client.
///
/// The client has an explicit lifecycle: `init` before first use, `close`
/// after the last. Operations on a closed client fail with
/// [`StorageError::Closed`](crate::error::StorageError::Closed).
#[async_trait]
pub trait Storage: SubjectStorage + UserStorage + RelationExpansion {
    /// Prepare backend resources.
    async fn init(&self) -> StorageResult<()>;

    /// Release backend resources.
    async fn close(&self) -> StorageResult<()>;

    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
