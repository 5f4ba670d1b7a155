//! Uploaded file parts handed from the HTTP layer to services.

use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use hungr_core::result::AppResult;
use hungr_entity::NewFile;
use hungr_storage::StorageManager;

/// Content type assumed when a part does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// One uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-side file name, if sent.
    pub file_name: Option<String>,
    /// Declared content type.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

impl Upload {
    /// Build an upload, defaulting a missing or blank content type.
    pub fn new(file_name: Option<String>, content_type: Option<String>, data: Bytes) -> Self {
        let content_type = content_type
            .map(|ct| ct.trim().to_string())
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        Self {
            file_name,
            content_type,
            data,
        }
    }

    /// Whether the part is an image.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Name to show in messages.
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("upload")
    }
}

/// Write uploads to blob storage and describe them for the file store.
///
/// Stops at the first failure after removing the blobs this call already
/// wrote.
pub(crate) async fn store_uploads(
    storage: &StorageManager,
    recipe_uuid: Uuid,
    uploads: Vec<Upload>,
) -> AppResult<Vec<NewFile>> {
    let mut files = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let file_uuid = Uuid::new_v4();
        match storage.put_file(recipe_uuid, file_uuid, upload.data).await {
            Ok(storage_key) => files.push(NewFile {
                uuid: file_uuid,
                content_type: upload.content_type,
                storage_key,
            }),
            Err(e) => {
                discard_uploads(storage, &files).await;
                return Err(e);
            }
        }
    }
    Ok(files)
}

/// Remove blobs that no file row will point at.
pub(crate) async fn discard_uploads(storage: &StorageManager, files: &[NewFile]) {
    for file in files {
        if let Err(e) = storage.remove(&file.storage_key).await {
            warn!(key = %file.storage_key, error = %e, "Failed to remove orphaned file");
        }
    }
}
