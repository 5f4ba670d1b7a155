//! File service.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;
use hungr_database::Stores;
use hungr_entity::File;
use hungr_storage::StorageManager;

use crate::upload::{Upload, discard_uploads, store_uploads};

/// Bytes of a stored file with the type to serve them as.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Content type recorded at upload.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

/// Manages recipe files after creation.
#[derive(Clone)]
pub struct FileService {
    stores: Stores,
    storage: Arc<StorageManager>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(stores: Stores, storage: Arc<StorageManager>) -> Self {
        Self { stores, storage }
    }

    /// Append uploads after the recipe's last page.
    pub async fn append(&self, recipe_uuid: Uuid, uploads: Vec<Upload>) -> AppResult<Vec<File>> {
        if self.stores.recipes.find_by_uuid(recipe_uuid).await?.is_none() {
            return Err(AppError::not_found("recipe not found"));
        }
        if uploads.is_empty() {
            return Err(AppError::validation("at least one file is required"));
        }

        let new_files = store_uploads(&self.storage, recipe_uuid, uploads).await?;
        match self.stores.files.append(recipe_uuid, &new_files).await {
            Ok(files) => {
                info!(recipe_uuid = %recipe_uuid, count = files.len(), "Files added to recipe");
                Ok(files)
            }
            Err(e) => {
                discard_uploads(&self.storage, &new_files).await;
                Err(e)
            }
        }
    }

    /// Load a file's bytes for download.
    pub async fn open(&self, file_uuid: Uuid) -> AppResult<FileContent> {
        let blob = self
            .stores
            .files
            .find_blob(file_uuid)
            .await?
            .ok_or_else(|| AppError::not_found("file not found"))?;

        let data = self.storage.get(&blob.storage_key).await.map_err(|e| {
            warn!(file_uuid = %file_uuid, error = %e, "Stored file could not be read");
            AppError::not_found("file not found")
        })?;

        Ok(FileContent {
            content_type: blob.content_type,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use hungr_core::ErrorKind;
    use hungr_core::traits::storage::StorageProvider;
    use hungr_database::MemoryStore;
    use hungr_storage::LocalStorageProvider;

    /// Keeps blobs in memory and fails the write numbered `fail_on` (1-based).
    #[derive(Debug, Default)]
    struct FlakyStorage {
        blobs: Mutex<HashMap<String, Bytes>>,
        writes: Mutex<usize>,
        fail_on: usize,
    }

    #[async_trait]
    impl StorageProvider for FlakyStorage {
        fn provider_type(&self) -> &str {
            "flaky"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }

        async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
            self.blobs
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| AppError::storage("missing"))
        }

        async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
            let mut writes = self.writes.lock().unwrap();
            *writes += 1;
            if *writes == self.fail_on {
                return Err(AppError::storage("disk full"));
            }
            self.blobs.lock().unwrap().insert(path.to_string(), data);
            Ok(())
        }

        async fn delete(&self, path: &str) -> AppResult<()> {
            self.blobs.lock().unwrap().remove(path);
            Ok(())
        }

        async fn delete_dir(&self, path: &str) -> AppResult<()> {
            let prefix = format!("{}/", path.trim_end_matches('/'));
            self.blobs.lock().unwrap().retain(|key, _| !key.starts_with(&prefix));
            Ok(())
        }

        async fn exists(&self, path: &str) -> AppResult<bool> {
            Ok(self.blobs.lock().unwrap().contains_key(path))
        }
    }

    use crate::recipe::{CreateRecipeInput, RecipeService};

    async fn fixture(dir: &tempfile::TempDir) -> (FileService, RecipeService) {
        let stores = Stores::memory(MemoryStore::new());
        stores
            .users
            .upsert_by_email("cook@example.com", "Cook")
            .await
            .unwrap();
        let provider = LocalStorageProvider::new(dir.path()).await.unwrap();
        let storage = Arc::new(StorageManager::from_provider(Arc::new(provider)));
        (
            FileService::new(stores.clone(), Arc::clone(&storage)),
            RecipeService::new(stores, storage),
        )
    }

    fn png(bytes: &'static [u8]) -> Upload {
        Upload::new(
            Some("page.png".to_string()),
            Some("image/png".to_string()),
            Bytes::from_static(bytes),
        )
    }

    #[tokio::test]
    async fn test_append_continues_pages_and_serves_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let (files, recipes) = fixture(&dir).await;
        let created = recipes
            .create(CreateRecipeInput {
                owner_email: "cook@example.com".to_string(),
                name: "Bread".to_string(),
                tag_string: String::new(),
                source: None,
                uploads: vec![png(b"one")],
            })
            .await
            .unwrap();

        let added = files
            .append(created.recipe.uuid, vec![png(b"two"), png(b"three")])
            .await
            .unwrap();
        let pages: Vec<i32> = added.iter().map(|f| f.page_number).collect();
        assert_eq!(pages, [1, 2]);

        let content = files.open(added[1].uuid).await.unwrap();
        assert_eq!(content.content_type, "image/png");
        assert_eq!(content.data, Bytes::from_static(b"three"));
    }

    #[tokio::test]
    async fn test_append_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (files, recipes) = fixture(&dir).await;

        let err = files.append(Uuid::new_v4(), vec![png(b"x")]).await.unwrap_err();
        assert_eq!(err.message, "recipe not found");

        let created = recipes
            .create(CreateRecipeInput {
                owner_email: "cook@example.com".to_string(),
                name: "Bread".to_string(),
                tag_string: String::new(),
                source: None,
                uploads: vec![],
            })
            .await
            .unwrap();
        let err = files.append(created.recipe.uuid, vec![]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_failed_append_leaves_no_blobs_behind() {
        let stores = Stores::memory(MemoryStore::new());
        stores
            .users
            .upsert_by_email("cook@example.com", "Cook")
            .await
            .unwrap();
        let provider = Arc::new(FlakyStorage {
            fail_on: 3,
            ..FlakyStorage::default()
        });
        let storage = Arc::new(StorageManager::from_provider(provider.clone()));
        let files = FileService::new(stores.clone(), Arc::clone(&storage));
        let recipes = RecipeService::new(stores, storage);

        let created = recipes
            .create(CreateRecipeInput {
                owner_email: "cook@example.com".to_string(),
                name: "Bread".to_string(),
                tag_string: String::new(),
                source: None,
                uploads: vec![],
            })
            .await
            .unwrap();

        let err = files
            .append(
                created.recipe.uuid,
                vec![png(b"one"), png(b"two"), png(b"three"), png(b"four")],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert_eq!(*provider.writes.lock().unwrap(), 3);
        assert!(provider.blobs.lock().unwrap().is_empty());

        let listing = recipes.list_visible("cook@example.com").await.unwrap();
        assert!(listing.files.is_empty());
    }

    #[tokio::test]
    async fn test_open_unknown_file() {
        let dir = tempfile::tempdir().unwrap();
        let (files, _) = fixture(&dir).await;
        let err = files.open(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.message, "file not found");
    }
}
