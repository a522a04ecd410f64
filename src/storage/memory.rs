//! In-memory storage backend.
//!
//! Documents live in concurrent maps keyed by id. Nothing survives a restart,
//! which makes this backend the store of choice for tests and ephemeral runs.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    DeleteResult, Document, DocumentId, NewSubject, NewUser, PopulatedSubject, Subject,
    SubjectChanges, UpdateResult, User,
};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::{RelationExpansion, Storage, SubjectStorage, UserStorage};

/// A single collection of documents.
struct MemoryCollection<T: Document> {
    docs: DashMap<DocumentId, T>,
}

impl<T: Document> MemoryCollection<T> {
    fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    fn insert(&self, doc: T) -> T {
        self.docs.insert(doc.id(), doc.clone());
        doc
    }

    /// All documents sorted by id, i.e. in insertion order.
    fn all(&self) -> Vec<T> {
        let mut docs: Vec<T> = self.docs.iter().map(|entry| entry.value().clone()).collect();
        docs.sort_by_key(T::id);
        docs
    }

    fn get(&self, id: DocumentId) -> Option<T> {
        self.docs.get(&id).map(|entry| entry.value().clone())
    }

    fn remove(&self, id: DocumentId) -> bool {
        self.docs.remove(&id).is_some()
    }
}

/// In-memory storage implementation.
pub struct MemoryStorage {
    subjects: MemoryCollection<Subject>,
    users: MemoryCollection<User>,
    closed: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subjects: MemoryCollection::new(),
            users: MemoryCollection::new(),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> StorageResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubjectStorage for MemoryStorage {
    async fn insert_subject(&self, subject: NewSubject) -> StorageResult<Subject> {
        self.ensure_open()?;
        Ok(self
            .subjects
            .insert(subject.into_subject(DocumentId::generate())))
    }

    async fn find_subjects(&self) -> StorageResult<Vec<Subject>> {
        self.ensure_open()?;
        Ok(self.subjects.all())
    }

    async fn find_subject(&self, id: DocumentId) -> StorageResult<Option<Subject>> {
        self.ensure_open()?;
        Ok(self.subjects.get(id))
    }

    async fn update_subject(
        &self,
        id: DocumentId,
        changes: &SubjectChanges,
    ) -> StorageResult<UpdateResult> {
        self.ensure_open()?;

        let Some(mut entry) = self.subjects.docs.get_mut(&id) else {
            return Ok(UpdateResult::unmatched());
        };
        let modified = changes.apply(entry.value_mut());

        Ok(UpdateResult::new(1, u64::from(modified)))
    }

    async fn delete_subject(&self, id: DocumentId) -> StorageResult<DeleteResult> {
        self.ensure_open()?;
        Ok(DeleteResult::new(u64::from(self.subjects.remove(id))))
    }
}

#[async_trait]
impl UserStorage for MemoryStorage {
    async fn insert_user(&self, user: NewUser) -> StorageResult<User> {
        self.ensure_open()?;
        Ok(self.users.insert(user.into_user(DocumentId::generate())))
    }

    async fn find_users(&self) -> StorageResult<Vec<User>> {
        self.ensure_open()?;
        Ok(self.users.all())
    }

    async fn find_user(&self, id: DocumentId) -> StorageResult<Option<User>> {
        self.ensure_open()?;
        Ok(self.users.get(id))
    }
}

#[async_trait]
impl RelationExpansion for MemoryStorage {
    async fn find_subject_populated(
        &self,
        id: DocumentId,
    ) -> StorageResult<Option<PopulatedSubject>> {
        self.ensure_open()?;

        Ok(self.subjects.get(id).map(|subject| {
            let alumni = self.users.get(subject.alumni);
            PopulatedSubject::new(subject, alumni)
        }))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn init(&self) -> StorageResult<()> {
        self.closed.store(false, Ordering::Release);
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.ensure_open()
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
