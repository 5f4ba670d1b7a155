//! Recipe service.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;
use hungr_database::Stores;
use hungr_database::store::RECIPE_LIST_LIMIT;
use hungr_entity::{CreatedRecipe, File, NewRecipe, Recipe, RecipeStep, RecipeUpdate};
use hungr_storage::StorageManager;

use super::tags::parse_tag_string;
use crate::upload::{Upload, store_uploads};

/// Recipes visible to a viewer and the files that belong to them.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeListing {
    /// Visible recipes, newest first.
    pub recipes: Vec<Recipe>,
    /// Files of exactly those recipes, by page number.
    pub files: Vec<File>,
}

/// A recipe readable without a connection.
#[derive(Debug, Clone, Serialize)]
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

/// Input for creating a recipe.
#[derive(Debug, Clone)]
pub struct CreateRecipeInput {
    /// Owner email as sent by the client.
    pub owner_email: String,
    /// Display name.
    pub name: String,
    /// Raw comma-separated tags.
    pub tag_string: String,
    /// Optional provenance.
    pub source: Option<String>,
    /// Uploaded pages in order.
    pub uploads: Vec<Upload>,
}

/// Partial update. Absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    /// Replacement raw tag string.
    pub tag_string: Option<String>,
    /// `Some(None)` clears the source.
    pub source: Option<Option<String>>,
    /// New visibility.
    pub is_public: Option<bool>,
}

/// Orchestrates recipe rows, their files in blob storage, and tag links.
#[derive(Clone)]
pub struct RecipeService {
    stores: Stores,
    storage: Arc<StorageManager>,
}

fn clean_source(source: Option<String>) -> Option<String> {
    source
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl RecipeService {
    /// Creates a new recipe service.
    pub fn new(stores: Stores, storage: Arc<StorageManager>) -> Self {
        Self { stores, storage }
    }

    /// Recipes the viewer owns plus those shared with them.
    pub async fn list_visible(&self, email: &str) -> AppResult<RecipeListing> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::validation("email is required"));
        }

        let recipes = self
            .stores
            .recipes
            .list_visible_to(&email, RECIPE_LIST_LIMIT)
            .await?;
        let ids: Vec<Uuid> = recipes.iter().map(|r| r.uuid).collect();
        let files = self.stores.files.list_for_recipes(&ids).await?;

        Ok(RecipeListing { recipes, files })
    }

    /// Fetch a recipe or fail with 404.
    pub async fn get(&self, uuid: Uuid) -> AppResult<Recipe> {
        self.stores
            .recipes
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::not_found("recipe not found"))
    }

    /// Create a recipe with its uploads and tags.
    ///
    /// Bytes are written to blob storage first; if the database write fails
    /// they are removed again.
    pub async fn create(&self, input: CreateRecipeInput) -> AppResult<CreatedRecipe> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name is required"));
        }
        let owner_email = input.owner_email.trim().to_lowercase();
        if owner_email.is_empty() {
            return Err(AppError::validation("email is required"));
        }

        let recipe_uuid = Uuid::new_v4();
        let files = match store_uploads(&self.storage, recipe_uuid, input.uploads).await {
            Ok(files) => files,
            Err(e) => {
                self.storage.remove_recipe(recipe_uuid).await;
                return Err(e);
            }
        };

        let parsed = parse_tag_string(&input.tag_string);
        let new_recipe = NewRecipe {
            uuid: recipe_uuid,
            name: name.to_string(),
            owner_email,
            tag_string: parsed.tag_string,
            source: clean_source(input.source),
            files,
            tags: parsed.tags,
        };

        let created = match self.stores.recipes.create(&new_recipe).await {
            Ok(created) => created,
            Err(e) => {
                self.storage.remove_recipe(recipe_uuid).await;
                return Err(e);
            }
        };

        info!(
            recipe_uuid = %created.recipe.uuid,
            files = created.files.len(),
            tags = created.tags.len(),
            "Recipe created"
        );
        Ok(created)
    }

    /// Apply a partial update.
    pub async fn update(&self, uuid: Uuid, patch: RecipePatch) -> AppResult<()> {
        let update = RecipeUpdate {
            tags: patch.tag_string.as_deref().map(|raw| {
                let parsed = parse_tag_string(raw);
                (parsed.tag_string, parsed.tags)
            }),
            source: patch.source.map(clean_source),
            is_public: patch.is_public,
        };

        if !self.stores.recipes.update(uuid, &update).await? {
            return Err(AppError::not_found("recipe not found"));
        }
        info!(recipe_uuid = %uuid, "Recipe updated");
        Ok(())
    }

    /// Delete a recipe, its rows and its blobs.
    pub async fn delete(&self, uuid: Uuid) -> AppResult<()> {
        if !self.stores.recipes.delete(uuid).await? {
            return Err(AppError::not_found("recipe not found"));
        }
        self.storage.remove_recipe(uuid).await;
        info!(recipe_uuid = %uuid, "Recipe deleted");
        Ok(())
    }

    /// Everything needed to render a public recipe page.
    ///
    /// Private recipes are reported as missing.
    pub async fn get_public(&self, uuid: Uuid) -> AppResult<PublicRecipe> {
        let recipe = self.get(uuid).await?;
        if !recipe.is_public {
            return Err(AppError::not_found("recipe not found"));
        }

        let files = self.stores.files.list_for_recipes(&[uuid]).await?;
        let steps = self.stores.steps.list(uuid).await?;
        let tags = self
            .stores
            .tags
            .list_for_recipe(uuid)
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect();

        Ok(PublicRecipe {
            recipe,
            files,
            steps,
            tags,
        })
    }
}
