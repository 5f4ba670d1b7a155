//! User service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;
use hungr_database::Stores;
use hungr_entity::{CreateUser, User};
use hungr_storage::StorageManager;

use super::email::normalize_email;

/// Handles login and user CRUD.
#[derive(Clone)]
pub struct UserService {
    stores: Stores,
    storage: Arc<StorageManager>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(stores: Stores, storage: Arc<StorageManager>) -> Self {
        Self { stores, storage }
    }

    /// Log in by email, creating the user on first sight.
    ///
    /// There is no credential check; the email is the identity.
    pub async fn login(&self, email: &str) -> AppResult<User> {
        let email = normalize_email(email)?;
        let user = self.stores.users.upsert_by_email(&email, &email).await?;
        info!(user_uuid = %user.uuid, "User logged in");
        Ok(user)
    }

    /// Fetch a user by identifier.
    pub async fn get(&self, uuid: Uuid) -> AppResult<User> {
        self.stores.users
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    /// Fetch a user by email, normalizing it first.
    pub async fn get_by_email(&self, email: &str) -> AppResult<User> {
        let email = normalize_email(email)?;
        self.stores.users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    /// Create a user explicitly.
    pub async fn create(&self, email: &str, name: &str) -> AppResult<User> {
        let name = name.trim();
        if email.trim().is_empty() || name.is_empty() {
            return Err(AppError::validation("email and name are required"));
        }
        let input = CreateUser {
            email: normalize_email(email)?,
            name: name.to_string(),
        };
        let user = self.stores.users.create(&input).await?;
        info!(user_uuid = %user.uuid, "User created");
        Ok(user)
    }

    /// Change a user's display name.
    pub async fn rename(&self, uuid: Uuid, name: &str) -> AppResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name is required"));
        }
        let user = self
            .stores
            .users
            .update_name(uuid, name)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))?;
        info!(user_uuid = %uuid, "User renamed");
        Ok(user)
    }

    /// Delete a user with their recipes and connections.
    pub async fn delete(&self, uuid: Uuid) -> AppResult<()> {
        let user = self.get(uuid).await?;
        let owned: Vec<Uuid> = self
            .stores
            .recipes
            .list_visible_to(&user.email, i64::MAX)
            .await?
            .into_iter()
            .filter(|r| r.user_uuid == uuid)
            .map(|r| r.uuid)
            .collect();

        if !self.stores.users.delete(uuid).await? {
            return Err(AppError::not_found("user not found"));
        }
        for recipe in &owned {
            self.storage.remove_recipe(*recipe).await;
        }
        info!(user_uuid = %uuid, recipes = owned.len(), "User deleted");
        Ok(())
    }
}
