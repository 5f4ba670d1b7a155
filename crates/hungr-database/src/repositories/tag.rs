//! Tag catalog repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;
use hungr_entity::Tag;

use crate::store::TagStore;

/// Read access to the global tag catalog. Writes happen with recipe writes.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagStore for TagRepository {
    async fn list(&self) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT uuid, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to load tags", e))
    }

    async fn list_for_recipe(&self, recipe_uuid: Uuid) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>(
            r#"SELECT t.uuid, t.name FROM tags t
               JOIN recipe_tags rt ON rt.tag_uuid = t.uuid
               WHERE rt.recipe_uuid = $1
               ORDER BY t.name"#,
        )
        .bind(recipe_uuid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to load tags", e))
    }
}
