//! File-backed document collection.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tokio::sync::Mutex;

use crate::domain::{Document, DocumentId};
use crate::error::{StorageError, StorageResult};

/// One JSON file per document under `{base}/{collection}/{id}.json`.
pub struct FileCollection<T: Document> {
    /// Directory holding this collection's documents.
    dir: PathBuf,
    /// Serialises read-modify-write cycles within the process.
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> FileCollection<T> {
    /// Create a collection rooted under `base_dir`.
    #[must_use]
    pub fn new(base_dir: &Path) -> Self {
        Self {
            dir: base_dir.join(T::COLLECTION),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Directory holding this collection's documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a new document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn insert(&self, doc: T) -> StorageResult<T> {
        let _guard = self.lock.lock().await;
        self.write(&doc)?;
        Ok(doc)
    }

    /// Load every document, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub async fn all(&self) -> StorageResult<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.read_all()
    }

    /// Load a document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn get(&self, id: DocumentId) -> StorageResult<Option<T>> {
        let _guard = self.lock.lock().await;
        self.read(id)
    }

    /// Modify a document in place.
    ///
    /// `apply` returns whether it changed anything; unchanged documents are not
    /// rewritten. Returns `None` if no document has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub async fn modify<F>(&self, id: DocumentId, apply: F) -> StorageResult<Option<bool>>
    where
        F: FnOnce(&mut T) -> bool + Send,
    {
        let _guard = self.lock.lock().await;

        let Some(mut doc) = self.read(id)? else {
            return Ok(None);
        };

        let modified = apply(&mut doc);
        if modified {
            self.write(&doc)?;
        }

        Ok(Some(modified))
    }

    /// Remove a document. Returns `false` if no document has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    pub async fn delete(&self, id: DocumentId) -> StorageResult<bool> {
        let _guard = self.lock.lock().await;
        let path = self.document_path(id);

        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&path)?;
        Ok(true)
    }

    fn document_path(&self, id: DocumentId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn write(&self, doc: &T) -> StorageResult<()> {
        let path = self.document_path(doc.id());

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        file.lock_exclusive()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        serde_json::to_writer_pretty(&file, doc)?;
        file.sync_all()?;
        file.unlock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        Ok(())
    }

    fn read(&self, id: DocumentId) -> StorageResult<Option<T>> {
        let path = self.document_path(id);

        if !path.exists() {
            return Ok(None);
        }

        read_locked(&path).map(Some)
    }

    fn read_all(&self) -> StorageResult<Vec<T>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();

        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match read_locked::<T>(&path) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "Skipping unreadable document");
                }
            }
        }

        docs.sort_by_key(T::id);
        Ok(docs)
    }
}

fn read_locked<T: Document>(path: &Path) -> StorageResult<T> {
    let file = std::fs::File::open(path)?;
    file.lock_shared()
        .map_err(|e| StorageError::LockFailed(e.to_string()))?;

    let doc = serde_json::from_reader(&file);

    file.unlock()
        .map_err(|e| StorageError::LockFailed(e.to_string()))?;

    Ok(doc?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use tempfile::TempDir;

    fn create_test_collection() -> (FileCollection<User>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let collection = FileCollection::<User>::new(temp_dir.path());
        std::fs::create_dir_all(collection.dir()).unwrap();
        (collection, temp_dir)
    }

    fn user(name: &str) -> User {
        User {
            id: DocumentId::generate(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
        }
    }

    #[tokio::test]
    async fn test_document_crud() {
        let (collection, _temp) = create_test_collection();
        let ada = collection.insert(user("ada")).await.unwrap();

        assert!(collection.dir().join(format!("{}.json", ada.id)).exists());
        assert_eq!(collection.get(ada.id).await.unwrap(), Some(ada.clone()));

        let modified = collection
            .modify(ada.id, |doc| {
                doc.name = "Ada Lovelace".to_string();
                true
            })
            .await
            .unwrap();
        assert_eq!(modified, Some(true));
        assert_eq!(
            collection.get(ada.id).await.unwrap().unwrap().name,
            "Ada Lovelace"
        );

        assert!(collection.delete(ada.id).await.unwrap());
        assert!(!collection.delete(ada.id).await.unwrap());
        assert!(collection.get(ada.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_modify_missing() {
        let (collection, _temp) = create_test_collection();
        let result = collection
            .modify(DocumentId::generate(), |_| true)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_all_sorted_and_skips_garbage() {
        let (collection, _temp) = create_test_collection();
        let first = collection.insert(user("first")).await.unwrap();
        let second = collection.insert(user("second")).await.unwrap();

        std::fs::write(collection.dir().join("broken.json"), b"{not json").unwrap();
        std::fs::write(collection.dir().join("notes.txt"), b"ignored").unwrap();

        let all = collection.all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }
}
