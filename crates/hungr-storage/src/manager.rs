//! Storage manager: key layout for recipe uploads on top of a provider.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use hungr_core::config::StorageConfig;
use hungr_core::result::AppResult;
use hungr_core::traits::storage::StorageProvider;

use crate::providers::LocalStorageProvider;

/// Prefix under which every recipe's uploads live.
const RECIPE_PREFIX: &str = "recipes";

/// Routes recipe file reads and writes to the configured provider.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
}

impl StorageManager {
    /// Build the manager from configuration.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let provider = LocalStorageProvider::new(&config.root_path).await?;
        info!(root = %provider.root().display(), "Initialized local file storage");
        Ok(Self::from_provider(Arc::new(provider)))
    }

    /// Wrap an existing provider.
    pub fn from_provider(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &dyn StorageProvider {
        self.provider.as_ref()
    }

    /// Storage key of a recipe file.
    pub fn file_key(recipe_uuid: Uuid, file_uuid: Uuid) -> String {
        format!("{RECIPE_PREFIX}/{recipe_uuid}/{file_uuid}")
    }

    fn recipe_dir(recipe_uuid: Uuid) -> String {
        format!("{RECIPE_PREFIX}/{recipe_uuid}")
    }

    /// Store the bytes of an upload and return the key they were written to.
    pub async fn put_file(&self, recipe_uuid: Uuid, file_uuid: Uuid, data: Bytes) -> AppResult<String> {
        let key = Self::file_key(recipe_uuid, file_uuid);
        self.provider.write(&key, data).await?;
        Ok(key)
    }

    /// Read a stored upload.
    pub async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.provider.read_bytes(key).await
    }

    /// Remove a single upload.
    pub async fn remove(&self, key: &str) -> AppResult<()> {
        self.provider.delete(key).await
    }

    /// Remove every upload of a recipe.
    ///
    /// Failures are logged, not returned: the recipe row is already gone
    /// and orphaned bytes are harmless.
    pub async fn remove_recipe(&self, recipe_uuid: Uuid) {
        let dir = Self::recipe_dir(recipe_uuid);
        if let Err(e) = self.provider.delete_dir(&dir).await {
            warn!(recipe = %recipe_uuid, error = %e, "Failed to remove recipe files");
        }
    }

    /// Whether the provider is usable.
    pub async fn health_check(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }
}
