//! Request and response bodies as the client sees them.

use serde::{Deserialize, Serialize};

use hungr_entity::{File, Recipe, RecipeStep, Tag};

/// Recipes visible to a viewer and their files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipesResponse {
    /// Visible recipes, newest first.
    #[serde(rename = "recipeData")]
    pub recipe_data: Vec<Recipe>,
    /// Files of those recipes.
    #[serde(rename = "fileData")]
    pub file_data: Vec<File>,
}

impl RecipesResponse {
    /// Files of one recipe in page order.
    pub fn files_for(&self, recipe: &Recipe) -> Vec<&File> {
        let mut files: Vec<&File> = self
            .file_data
            .iter()
            .filter(|f| f.recipe_uuid == recipe.uuid)
            .collect();
        files.sort_by_key(|f| f.page_number);
        files
    }
}

/// A freshly created recipe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    /// The stored recipe.
    pub recipe: Recipe,
    /// Tags resolved from the tag string.
    pub tags: Vec<Tag>,
    /// Stored files; older servers omit this.
    #[serde(default)]
    pub files: Vec<File>,
}

/// Steps proposed by the extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtractedRecipe {
    /// Proposed steps.
    pub steps: Vec<RecipeStep>,
    /// Suggested tags, when the service offers them.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A public recipe page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicRecipe {
    /// The recipe.
    pub recipe: Recipe,
    /// Its files.
    pub files: Vec<File>,
    /// Its steps.
    pub steps: Vec<RecipeStep>,
    /// Linked tag names.
    pub tags: Vec<String>,
}

/// Partial recipe update. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipePatch {
    /// Replacement tag string.
    #[serde(rename = "tagString", skip_serializing_if = "Option::is_none")]
    pub tag_string: Option<String>,
    /// `Some(None)` sends `null`, which clears the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Option<String>>,
    /// New visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl RecipePatch {
    /// Replace the tag string.
    pub fn tags(tag_string: impl Into<String>) -> Self {
        Self {
            tag_string: Some(tag_string.into()),
            ..Self::default()
        }
    }

    /// Also set (or with `None`, clear) the source.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = Some(source);
        self
    }

    /// Also change visibility.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }
}

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Name sent in the multipart part.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    /// Contents.
    pub data: Vec<u8>,
}

impl FileUpload {
    /// Build an upload.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}
