//! Storage backend factory.
//!
//! Creates and initialises the storage backend selected by configuration.

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppError;
use crate::storage::file::FileStorage;
use crate::storage::memory::MemoryStorage;
use crate::storage::traits::Storage;

/// Create a storage backend based on configuration.
///
/// The returned client has already been initialised and health-checked; the
/// caller owns its teardown via [`Storage::close`].
///
/// # Errors
///
/// Returns an error if the storage backend cannot be initialized.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, AppError> {
    let storage: Arc<dyn Storage> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(FileStorage::new(&config.file)),
    };

    storage.init().await?;

    // Verify storage is healthy
    storage.health_check().await?;

    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_file_storage() {
        let temp_dir = TempDir::new().unwrap();

        let config = StorageConfig {
            backend: StorageBackend::File,
            file: crate::config::FileStorageConfig {
                data_dir: temp_dir.path().to_path_buf(),
            },
        };

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_name(), "file");
        assert!(temp_dir.path().join("subjects").is_dir());
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_name(), "memory");
    }
}
