//! Response DTOs.

use serde::{Deserialize, Serialize};

use hungr_entity::{File, Recipe, RecipeStep, Tag, User};

/// `{success: true}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true.
    pub success: bool,
}

impl SuccessResponse {
    /// The only value this type takes in practice.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{success, user}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Always true.
    pub success: bool,
    /// The user.
    pub user: User,
}

impl UserResponse {
    /// Wrap a user.
    pub fn ok(user: User) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Recipe listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipesResponse {
    /// Visible recipes, newest first.
    #[serde(rename = "recipeData")]
    pub recipe_data: Vec<Recipe>,
    /// Files of those recipes.
    #[serde(rename = "fileData")]
    pub file_data: Vec<File>,
}

/// Result of creating a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always true.
    pub success: bool,
    /// The stored recipe.
    pub recipe: Recipe,
    /// Catalog rows linked to it.
    pub tags: Vec<Tag>,
    /// Stored files in page order.
    pub files: Vec<File>,
}

/// Result of appending files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUploadResponse {
    /// Always true.
    pub success: bool,
    /// Appended files.
    pub files: Vec<File>,
}

/// `{steps}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsResponse {
    /// Steps in order; never null.
    pub steps: Vec<RecipeStep>,
}

/// `{tags}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    /// Every catalog tag by name.
    pub tags: Vec<Tag>,
}

/// `{success, connections}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionsResponse {
    /// Always true.
    pub success: bool,
    /// Users on the other end.
    pub connections: Vec<User>,
}

/// `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a backend check fails.
    pub status: String,
    /// Crate version.
    pub version: String,
}
