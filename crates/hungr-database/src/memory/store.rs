//! Table-backed implementation of every store trait.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;
use hungr_entity::{
    Connection, CreateUser, CreatedRecipe, File, FileBlob, NewFile, NewRecipe, Recipe, RecipeStep,
    RecipeUpdate, Tag, User,
};

use crate::store::{ConnectionStore, FileStore, RecipeStore, StepStore, TagStore, UserStore};

#[derive(Debug, Clone)]
struct FileRow {
    file: File,
    content_type: String,
    storage_key: String,
}

#[derive(Debug, Clone, Copy)]
struct TagLink {
    recipe_uuid: Uuid,
    tag_uuid: Uuid,
    position: i32,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    /// Insertion order, oldest first.
    recipes: Vec<Recipe>,
    files: Vec<FileRow>,
    /// Keyed by name, which is unique.
    tags: BTreeMap<String, Tag>,
    recipe_tags: Vec<TagLink>,
    steps: HashMap<Uuid, Vec<RecipeStep>>,
    connections: Vec<Connection>,
}

impl Tables {
    fn user(&self, uuid: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.uuid == uuid)
    }

    fn link_tags(&mut self, recipe_uuid: Uuid, tags: &[Tag]) -> Vec<Tag> {
        let mut stored = Vec::with_capacity(tags.len());
        for (position, tag) in tags.iter().enumerate() {
            let row = self
                .tags
                .entry(tag.name.clone())
                .or_insert_with(|| tag.clone())
                .clone();
            let linked = self
                .recipe_tags
                .iter()
                .any(|l| l.recipe_uuid == recipe_uuid && l.tag_uuid == row.uuid);
            if !linked {
                self.recipe_tags.push(TagLink {
                    recipe_uuid,
                    tag_uuid: row.uuid,
                    position: position as i32,
                });
            }
            stored.push(row);
        }
        stored
    }

    fn insert_file(&mut self, recipe_uuid: Uuid, file: &NewFile, page_number: i32) -> File {
        let stored = File {
            uuid: file.uuid,
            recipe_uuid,
            url: File::url_for(file.uuid),
            page_number,
            image: file.is_image(),
        };
        self.files.push(FileRow {
            file: stored.clone(),
            content_type: file.content_type.clone(),
            storage_key: file.storage_key.clone(),
        });
        stored
    }

    fn remove_recipes(&mut self, doomed: &[Uuid]) {
        self.recipes.retain(|r| !doomed.contains(&r.uuid));
        self.files.retain(|f| !doomed.contains(&f.file.recipe_uuid));
        self.recipe_tags.retain(|l| !doomed.contains(&l.recipe_uuid));
        for uuid in doomed {
            self.steps.remove(uuid);
        }
    }

    fn users_sorted(&self, uuids: impl Iterator<Item = Uuid>) -> Vec<User> {
        let mut users: Vec<User> = uuids.filter_map(|id| self.user(id).cloned()).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }
}

/// Store that keeps every table behind one lock.
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        debug!("Creating in-memory store");
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.user(uuid).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, input: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == input.email) {
            return Err(AppError::conflict("user with this email already exists"));
        }
        let user = User {
            uuid: Uuid::new_v4(),
            email: input.email.clone(),
            name: input.name.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn upsert_by_email(&self, email: &str, name: &str) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.users.iter().find(|u| u.email == email) {
            return Ok(existing.clone());
        }
        let user = User {
            uuid: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_name(&self, uuid: Uuid, name: &str) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.uuid == uuid).map(|u| {
            u.name = name.to_string();
            u.clone()
        }))
    }

    async fn delete(&self, uuid: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.uuid != uuid);
        if tables.users.len() == before {
            return Ok(false);
        }

        let owned: Vec<Uuid> = tables
            .recipes
            .iter()
            .filter(|r| r.user_uuid == uuid)
            .map(|r| r.uuid)
            .collect();
        tables.remove_recipes(&owned);
        tables
            .connections
            .retain(|c| c.source_user_uuid != uuid && c.target_user_uuid != uuid);
        Ok(true)
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list_visible_to(&self, email: &str, limit: i64) -> AppResult<Vec<Recipe>> {
        let tables = self.tables.read().await;
        let Some(viewer) = tables.users.iter().find(|u| u.email == email) else {
            return Ok(Vec::new());
        };

        let visible = |recipe: &&Recipe| {
            recipe.user_uuid == viewer.uuid
                || tables.connections.iter().any(|c| {
                    c.source_user_uuid == recipe.user_uuid && c.target_user_uuid == viewer.uuid
                })
        };

        let mut recipes: Vec<Recipe> = tables.recipes.iter().rev().filter(visible).cloned().collect();
        // Stable sort keeps later inserts first among equal timestamps.
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recipes.truncate(limit.max(0) as usize);
        Ok(recipes)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Recipe>> {
        let tables = self.tables.read().await;
        Ok(tables.recipes.iter().find(|r| r.uuid == uuid).cloned())
    }

    async fn create(&self, input: &NewRecipe) -> AppResult<CreatedRecipe> {
        let mut tables = self.tables.write().await;
        let owner = tables
            .users
            .iter()
            .find(|u| u.email == input.owner_email)
            .map(|u| u.uuid)
            .ok_or_else(|| AppError::not_found("user not found"))?;
        if tables.recipes.iter().any(|r| r.uuid == input.uuid) {
            return Err(AppError::conflict("recipe already exists"));
        }

        let recipe = Recipe {
            uuid: input.uuid,
            name: input.name.clone(),
            user_uuid: owner,
            owner_email: input.owner_email.clone(),
            tag_string: input.tag_string.clone(),
            source: input.source.clone(),
            is_public: false,
            created_at: Utc::now(),
        };
        tables.recipes.push(recipe.clone());

        let files = input
            .files
            .iter()
            .enumerate()
            .map(|(page, file)| tables.insert_file(recipe.uuid, file, page as i32))
            .collect();
        let tags = tables.link_tags(recipe.uuid, &input.tags);

        Ok(CreatedRecipe {
            recipe,
            files,
            tags,
        })
    }

    async fn update(&self, uuid: Uuid, update: &RecipeUpdate) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(recipe) = tables.recipes.iter_mut().find(|r| r.uuid == uuid) else {
            return Ok(false);
        };

        if let Some(source) = &update.source {
            recipe.source = source.clone();
        }
        if let Some(is_public) = update.is_public {
            recipe.is_public = is_public;
        }
        if let Some((tag_string, tags)) = &update.tags {
            recipe.tag_string = tag_string.clone();
            tables.recipe_tags.retain(|l| l.recipe_uuid != uuid);
            tables.link_tags(uuid, tags);
        }
        Ok(true)
    }

    async fn delete(&self, uuid: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.recipes.iter().any(|r| r.uuid == uuid) {
            return Ok(false);
        }
        tables.remove_recipes(&[uuid]);
        Ok(true)
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn list_for_recipes(&self, recipe_uuids: &[Uuid]) -> AppResult<Vec<File>> {
        let tables = self.tables.read().await;
        let mut files: Vec<File> = tables
            .files
            .iter()
            .filter(|row| recipe_uuids.contains(&row.file.recipe_uuid))
            .map(|row| row.file.clone())
            .collect();
        files.sort_by_key(|f| f.page_number);
        Ok(files)
    }

    async fn append(&self, recipe_uuid: Uuid, files: &[NewFile]) -> AppResult<Vec<File>> {
        let mut tables = self.tables.write().await;
        let next = tables
            .files
            .iter()
            .filter(|row| row.file.recipe_uuid == recipe_uuid)
            .map(|row| row.file.page_number)
            .max()
            .map_or(0, |max| max + 1);

        Ok(files
            .iter()
            .enumerate()
            .map(|(offset, file)| tables.insert_file(recipe_uuid, file, next + offset as i32))
            .collect())
    }

    async fn find_blob(&self, uuid: Uuid) -> AppResult<Option<FileBlob>> {
        let tables = self.tables.read().await;
        Ok(tables
            .files
            .iter()
            .find(|row| row.file.uuid == uuid)
            .map(|row| FileBlob {
                uuid: row.file.uuid,
                recipe_uuid: row.file.recipe_uuid,
                content_type: row.content_type.clone(),
                storage_key: row.storage_key.clone(),
            }))
    }
}

#[async_trait]
impl StepStore for MemoryStore {
    async fn list(&self, recipe_uuid: Uuid) -> AppResult<Vec<RecipeStep>> {
        let tables = self.tables.read().await;
        Ok(tables.steps.get(&recipe_uuid).cloned().unwrap_or_default())
    }

    async fn replace(&self, recipe_uuid: Uuid, steps: &[RecipeStep]) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if steps.is_empty() {
            tables.steps.remove(&recipe_uuid);
        } else {
            tables.steps.insert(recipe_uuid, steps.to_vec());
        }
        Ok(())
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().cloned().collect())
    }

    async fn list_for_recipe(&self, recipe_uuid: Uuid) -> AppResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .recipe_tags
            .iter()
            .filter(|l| l.recipe_uuid == recipe_uuid)
            .filter_map(|l| tables.tags.values().find(|t| t.uuid == l.tag_uuid).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[async_trait]
impl ConnectionStore for MemoryStore {
    async fn create(&self, source: Uuid, target: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if source == target {
            return Err(AppError::validation("cannot connect user to themselves"));
        }
        let exists = tables
            .connections
            .iter()
            .any(|c| c.source_user_uuid == source && c.target_user_uuid == target);
        if exists {
            return Ok(false);
        }
        tables.connections.push(Connection {
            source_user_uuid: source,
            target_user_uuid: target,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn list_targets(&self, user: Uuid) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let targets = tables
            .connections
            .iter()
            .filter(|c| c.source_user_uuid == user)
            .map(|c| c.target_user_uuid);
        Ok(tables.users_sorted(targets))
    }

    async fn list_sources(&self, user: Uuid) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let sources = tables
            .connections
            .iter()
            .filter(|c| c.target_user_uuid == user)
            .map(|c| c.source_user_uuid);
        Ok(tables.users_sorted(sources))
    }

    async fn delete(&self, source: Uuid, target: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.connections.len();
        tables
            .connections
            .retain(|c| !(c.source_user_uuid == source && c.target_user_uuid == target));
        Ok(tables.connections.len() < before)
    }
}
