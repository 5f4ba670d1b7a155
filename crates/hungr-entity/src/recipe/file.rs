//! Recipe file records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file (usually a photo) attached to a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// File identifier.
    pub uuid: Uuid,
    /// Owning recipe.
    pub recipe_uuid: Uuid,
    /// Server-relative download path.
    pub url: String,
    /// 0-based position within the recipe.
    pub page_number: i32,
    /// Whether the content type is `image/*`.
    pub image: bool,
}

impl File {
    /// Download path served by the API for a file.
    pub fn url_for(uuid: Uuid) -> String {
        format!("/api/files/{uuid}")
    }
}

/// A file about to be stored. The bytes already live in blob storage under
/// `storage_key`.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// Pre-assigned identifier.
    pub uuid: Uuid,
    /// MIME type as uploaded.
    pub content_type: String,
    /// Blob storage key.
    pub storage_key: String,
}

impl NewFile {
    /// Whether this upload counts as an image.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Where a file's bytes are kept and how to serve them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FileBlob {
    /// File identifier.
    pub uuid: Uuid,
    /// Owning recipe.
    pub recipe_uuid: Uuid,
    /// MIME type as uploaded.
    pub content_type: String,
    /// Blob storage key.
    pub storage_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        let id = Uuid::nil();
        assert_eq!(
            File::url_for(id),
            "/api/files/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_is_image() {
        let file = NewFile {
            uuid: Uuid::new_v4(),
            content_type: "image/png".to_string(),
            storage_key: "k".to_string(),
        };
        assert!(file.is_image());

        let pdf = NewFile {
            content_type: "application/pdf".to_string(),
            ..file
        };
        assert!(!pdf.is_image());
    }
}
