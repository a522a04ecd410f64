//! Subject service.
//!
//! Create, read, update, and delete subjects, and resolve the students they
//! reference.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DeleteResult, Subject, SubjectDraft, SubjectPatch, UpdateResult, User};
use crate::error::{AppError, Result};
use crate::service::{observe, parse_id};
use crate::storage::traits::Storage;

/// Service for subject documents.
pub struct SubjectService {
    /// Storage backend.
    storage: Arc<dyn Storage>,
}

impl SubjectService {
    /// Create a new subject service.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Validate and persist a new subject.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is missing, or a
    /// storage error if the write fails.
    pub async fn create(&self, draft: SubjectDraft) -> Result<Subject> {
        observe("create_subject", async {
            let subject = draft.validate()?;
            let created = self.storage.insert_subject(subject).await?;
            debug!(id = %created.id, "Subject created");
            Ok::<_, AppError>(created)
        })
        .await
    }

    /// List every subject.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list_all(&self) -> Result<Vec<Subject>> {
        observe("list_subjects", async {
            Ok::<_, AppError>(self.storage.find_subjects().await?)
        })
        .await
    }

    /// Get a subject by id. A well-formed id with no record yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed or storage fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Subject>> {
        observe("get_subject", async {
            let id = parse_id::<Subject>(id)?;
            Ok::<_, AppError>(self.storage.find_subject(id).await?)
        })
        .await
    }

    /// Apply the supplied fields to a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed, a supplied field is invalid, or
    /// storage fails.
    pub async fn update_by_id(&self, id: &str, patch: SubjectPatch) -> Result<UpdateResult> {
        observe("update_subject", async {
            let id = parse_id::<Subject>(id)?;
            let changes = patch.validate()?;
            let ack = self.storage.update_subject(id, &changes).await?;
            debug!(
                %id,
                matched = ack.matched_count,
                modified = ack.modified_count,
                "Subject updated"
            );
            Ok::<_, AppError>(ack)
        })
        .await
    }

    /// Delete a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed or storage fails.
    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteResult> {
        observe("delete_subject", async {
            let id = parse_id::<Subject>(id)?;
            let ack = self.storage.delete_subject(id).await?;
            debug!(%id, deleted = ack.deleted_count, "Subject deleted");
            Ok::<_, AppError>(ack)
        })
        .await
    }

    /// Get the students of a subject.
    ///
    /// Returns the expanded `alumni` as a one-element list, or an empty list if
    /// the subject does not exist. A dangling reference yields `[None]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed or storage fails.
    pub async fn students(&self, id: &str) -> Result<Vec<Option<User>>> {
        observe("subject_students", async {
            let id = parse_id::<Subject>(id)?;
            let populated = self.storage.find_subject_populated(id).await?;
            let students: Vec<_> = populated.map(|subject| subject.alumni).into_iter().collect();
            Ok::<_, AppError>(students)
        })
        .await
    }
}
