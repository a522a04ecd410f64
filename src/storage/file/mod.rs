//! File-based storage backend.
//!
//! This backend stores each document as a JSON file with file locking for
//! atomic reads and writes. Suitable for development and single-node
//! deployments.
//!
//! Directory structure:
//! ```text
//! data/
//! ├── subjects/
//! │   └── {id}.json
//! └── users/
//!     └── {id}.json
//! ```

mod collection;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::config::FileStorageConfig;
use crate::domain::{
    DeleteResult, DocumentId, NewSubject, NewUser, PopulatedSubject, Subject, SubjectChanges,
    UpdateResult, User,
};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::{RelationExpansion, Storage, SubjectStorage, UserStorage};

pub use collection::FileCollection;

/// File-based storage implementation.
pub struct FileStorage {
    /// Base data directory.
    base_dir: PathBuf,
    /// Subject documents.
    subjects: FileCollection<Subject>,
    /// User documents.
    users: FileCollection<User>,
    /// Set by `close`, cleared by `init`.
    closed: AtomicBool,
}

impl FileStorage {
    /// Create a new file storage instance.
    ///
    /// No filesystem access happens until [`Storage::init`] is called.
    #[must_use]
    pub fn new(config: &FileStorageConfig) -> Self {
        let base_dir = config.data_dir.clone();

        Self {
            subjects: FileCollection::new(&base_dir),
            users: FileCollection::new(&base_dir),
            base_dir,
            closed: AtomicBool::new(false),
        }
    }

    /// Base data directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Ensure all required directories exist.
    fn ensure_directories(&self) -> StorageResult<()> {
        let dirs = [
            self.base_dir.as_path(),
            self.subjects.dir(),
            self.users.dir(),
        ];

        for dir in dirs {
            std::fs::create_dir_all(dir).map_err(|e| {
                StorageError::FileIO(format!("Failed to create directory {}: {e}", dir.display()))
            })?;
        }

        Ok(())
    }

    fn ensure_open(&self) -> StorageResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl SubjectStorage for FileStorage {
    async fn insert_subject(&self, subject: NewSubject) -> StorageResult<Subject> {
        self.ensure_open()?;
        self.subjects
            .insert(subject.into_subject(DocumentId::generate()))
            .await
    }

    async fn find_subjects(&self) -> StorageResult<Vec<Subject>> {
        self.ensure_open()?;
        self.subjects.all().await
    }

    async fn find_subject(&self, id: DocumentId) -> StorageResult<Option<Subject>> {
        self.ensure_open()?;
        self.subjects.get(id).await
    }

    async fn update_subject(
        &self,
        id: DocumentId,
        changes: &SubjectChanges,
    ) -> StorageResult<UpdateResult> {
        self.ensure_open()?;

        let result = self
            .subjects
            .modify(id, |subject| changes.apply(subject))
            .await?;

        Ok(result.map_or_else(UpdateResult::unmatched, |modified| {
            UpdateResult::new(1, u64::from(modified))
        }))
    }

    async fn delete_subject(&self, id: DocumentId) -> StorageResult<DeleteResult> {
        self.ensure_open()?;
        let deleted = self.subjects.delete(id).await?;
        Ok(DeleteResult::new(u64::from(deleted)))
    }
}

#[async_trait]
impl UserStorage for FileStorage {
    async fn insert_user(&self, user: NewUser) -> StorageResult<User> {
        self.ensure_open()?;
        self.users.insert(user.into_user(DocumentId::generate())).await
    }

    async fn find_users(&self) -> StorageResult<Vec<User>> {
        self.ensure_open()?;
        self.users.all().await
    }

    async fn find_user(&self, id: DocumentId) -> StorageResult<Option<User>> {
        self.ensure_open()?;
        self.users.get(id).await
    }
}

#[async_trait]
impl RelationExpansion for FileStorage {
    async fn find_subject_populated(
        &self,
        id: DocumentId,
    ) -> StorageResult<Option<PopulatedSubject>> {
        self.ensure_open()?;

        let Some(subject) = self.subjects.get(id).await? else {
            return Ok(None);
        };
        let alumni = self.users.get(subject.alumni).await?;

        Ok(Some(PopulatedSubject::new(subject, alumni)))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn init(&self) -> StorageResult<()> {
        self.ensure_directories()?;
        self.closed.store(false, Ordering::Release);
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.ensure_open()?;

        // Check if base directory is accessible
        if !self.base_dir.exists() {
            return Err(StorageError::Unavailable);
        }

        // Try to create a test file
        let test_file = self.base_dir.join(".health_check");
        tokio::fs::write(&test_file, b"ok")
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check failed: {e}")))?;
        tokio::fs::remove_file(&test_file)
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check cleanup failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
