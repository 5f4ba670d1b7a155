//! Store traits, one per aggregate.
//!
//! Services depend on these traits only. PostgreSQL implementations live in
//! [`crate::repositories`], the in-memory one in [`crate::memory`].

use async_trait::async_trait;
use uuid::Uuid;

use hungr_core::result::AppResult;
use hungr_entity::{
    CreateUser, CreatedRecipe, File, FileBlob, NewFile, NewRecipe, Recipe, RecipeStep,
    RecipeUpdate, Tag, User,
};

/// How many recipes a listing returns at most.
pub const RECIPE_LIST_LIMIT: i64 = 100;

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by identifier.
    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<User>>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user. Fails with a conflict when the email is taken.
    async fn create(&self, input: &CreateUser) -> AppResult<User>;

    /// Return the user with this email, creating it with `name` if missing.
    async fn upsert_by_email(&self, email: &str, name: &str) -> AppResult<User>;

    /// Rename a user. Returns `None` when the user does not exist.
    async fn update_name(&self, uuid: Uuid, name: &str) -> AppResult<Option<User>>;

    /// Delete a user and everything they own. Returns `true` if deleted.
    async fn delete(&self, uuid: Uuid) -> AppResult<bool>;
}

/// Recipe persistence, including the tag links that hang off a recipe.
#[async_trait]
pub trait RecipeStore: Send + Sync + 'static {
    /// Recipes owned by `email` plus those whose owner connects to `email`,
    /// newest first, at most `limit`.
    async fn list_visible_to(&self, email: &str, limit: i64) -> AppResult<Vec<Recipe>>;

    /// Find a recipe by identifier.
    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Recipe>>;

    /// Insert a recipe with its files and tags atomically.
    ///
    /// Fails with not-found when `owner_email` has no user.
    async fn create(&self, input: &NewRecipe) -> AppResult<CreatedRecipe>;

    /// Apply a partial update. Returns `false` when the recipe is missing.
    async fn update(&self, uuid: Uuid, update: &RecipeUpdate) -> AppResult<bool>;

    /// Delete a recipe; files, steps and tag links go with it.
    async fn delete(&self, uuid: Uuid) -> AppResult<bool>;
}

/// Recipe file records.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Files of the given recipes ordered by page number.
    async fn list_for_recipes(&self, recipe_uuids: &[Uuid]) -> AppResult<Vec<File>>;

    /// Append files after the recipe's current last page.
    async fn append(&self, recipe_uuid: Uuid, files: &[NewFile]) -> AppResult<Vec<File>>;

    /// Storage location of a file.
    async fn find_blob(&self, uuid: Uuid) -> AppResult<Option<FileBlob>>;
}

/// Ordered step lists.
#[async_trait]
pub trait StepStore: Send + Sync + 'static {
    /// Steps of a recipe in order.
    async fn list(&self, recipe_uuid: Uuid) -> AppResult<Vec<RecipeStep>>;

    /// Replace the whole step list.
    async fn replace(&self, recipe_uuid: Uuid, steps: &[RecipeStep]) -> AppResult<()>;
}

/// Global tag catalog.
#[async_trait]
pub trait TagStore: Send + Sync + 'static {
    /// Every tag ordered by name.
    async fn list(&self) -> AppResult<Vec<Tag>>;

    /// Tags linked to a recipe ordered by name.
    async fn list_for_recipe(&self, recipe_uuid: Uuid) -> AppResult<Vec<Tag>>;
}

/// Directed user connections.
#[async_trait]
pub trait ConnectionStore: Send + Sync + 'static {
    /// Insert an edge. Returns `false` when it already existed.
    async fn create(&self, source: Uuid, target: Uuid) -> AppResult<bool>;

    /// Users that `user` connects to, ordered by name.
    async fn list_targets(&self, user: Uuid) -> AppResult<Vec<User>>;

    /// Users that connect to `user`, ordered by name.
    async fn list_sources(&self, user: Uuid) -> AppResult<Vec<User>>;

    /// Delete an edge. Returns `true` if it existed.
    async fn delete(&self, source: Uuid, target: Uuid) -> AppResult<bool>;
}
