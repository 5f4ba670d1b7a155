//! Recipe repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;
use hungr_entity::{CreatedRecipe, NewRecipe, Recipe, RecipeUpdate, Tag};

use super::file::insert_file;
use crate::store::RecipeStore;

const RECIPE_SELECT: &str = r#"
    SELECT r.uuid, r.name, r.user_uuid, u.email AS owner_email,
           r.tag_string, r.source, r.is_public, r.created_at
    FROM recipes r
    JOIN users u ON u.uuid = r.user_uuid"#;

/// Repository for recipes and their tag links.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: PgPool,
}

impl RecipeRepository {
    /// Create a new recipe repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Upsert catalog rows by name and link them to the recipe in order.
///
/// Returns the stored rows, which carry the catalog's uuid if the name was
/// already known.
async fn link_tags(conn: &mut PgConnection, recipe_uuid: Uuid, tags: &[Tag]) -> AppResult<Vec<Tag>> {
    let mut stored = Vec::with_capacity(tags.len());
    for (position, tag) in tags.iter().enumerate() {
        let row = sqlx::query_as::<_, Tag>(
            r#"INSERT INTO tags (uuid, name) VALUES ($1, $2)
               ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
               RETURNING uuid, name"#,
        )
        .bind(tag.uuid)
        .bind(&tag.name)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to create tag", e))?;

        sqlx::query(
            r#"INSERT INTO recipe_tags (recipe_uuid, tag_uuid, position) VALUES ($1, $2, $3)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(recipe_uuid)
        .bind(row.uuid)
        .bind(position as i32)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to link tag", e))?;

        stored.push(row);
    }
    Ok(stored)
}

#[async_trait]
impl RecipeStore for RecipeRepository {
    async fn list_visible_to(&self, email: &str, limit: i64) -> AppResult<Vec<Recipe>> {
        let sql = format!(
            r#"{RECIPE_SELECT}
               WHERE u.email = $1
                  OR EXISTS (
                       SELECT 1 FROM user_connections c
                       JOIN users viewer ON viewer.uuid = c.target_user_uuid
                       WHERE c.source_user_uuid = r.user_uuid AND viewer.email = $1
                  )
               ORDER BY r.created_at DESC
               LIMIT $2"#
        );

        sqlx::query_as::<_, Recipe>(&sql)
            .bind(email)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to load recipes", e))
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Recipe>> {
        let sql = format!("{RECIPE_SELECT} WHERE r.uuid = $1");
        sqlx::query_as::<_, Recipe>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to get recipe", e))
    }

    async fn create(&self, input: &NewRecipe) -> AppResult<CreatedRecipe> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let owner: Option<Uuid> = sqlx::query_scalar("SELECT uuid FROM users WHERE email = $1")
            .bind(&input.owner_email)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to create recipe", e))?;
        let owner = owner.ok_or_else(|| AppError::not_found("user not found"))?;

        let uuid = input.uuid;
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"INSERT INTO recipes (uuid, name, user_uuid, tag_string, source)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING created_at"#,
        )
        .bind(uuid)
        .bind(&input.name)
        .bind(owner)
        .bind(&input.tag_string)
        .bind(&input.source)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to create recipe", e))?;

        let mut files = Vec::with_capacity(input.files.len());
        for (page, file) in input.files.iter().enumerate() {
            files.push(insert_file(&mut tx, uuid, file, page as i32).await?);
        }

        let tags = link_tags(&mut tx, uuid, &input.tags).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to create recipe", e))?;

        Ok(CreatedRecipe {
            recipe: Recipe {
                uuid,
                name: input.name.clone(),
                user_uuid: owner,
                owner_email: input.owner_email.clone(),
                tag_string: input.tag_string.clone(),
                source: input.source.clone(),
                is_public: false,
                created_at,
            },
            files,
            tags,
        })
    }

    async fn update(&self, uuid: Uuid, update: &RecipeUpdate) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let exists: Option<Uuid> =
            sqlx::query_scalar("SELECT uuid FROM recipes WHERE uuid = $1 FOR UPDATE")
                .bind(uuid)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "failed to get recipe", e)
                })?;
        if exists.is_none() {
            return Ok(false);
        }

        if let Some((tag_string, tags)) = &update.tags {
            sqlx::query("UPDATE recipes SET tag_string = $2 WHERE uuid = $1")
                .bind(uuid)
                .bind(tag_string)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "failed to update recipe", e)
                })?;

            sqlx::query("DELETE FROM recipe_tags WHERE recipe_uuid = $1")
                .bind(uuid)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "failed to update tags", e)
                })?;

            link_tags(&mut tx, uuid, tags).await?;
        }

        if let Some(source) = &update.source {
            sqlx::query("UPDATE recipes SET source = $2 WHERE uuid = $1")
                .bind(uuid)
                .bind(source)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "failed to update recipe", e)
                })?;
        }

        if let Some(is_public) = update.is_public {
            sqlx::query("UPDATE recipes SET is_public = $2 WHERE uuid = $1")
                .bind(uuid)
                .bind(is_public)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "failed to update recipe", e)
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to update recipe", e))?;
        Ok(true)
    }

    async fn delete(&self, uuid: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to delete recipe", e))?;
        Ok(result.rows_affected() > 0)
    }
}
