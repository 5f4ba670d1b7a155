//! Recipe step repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;
use hungr_entity::RecipeStep;

use crate::store::StepStore;

/// Repository for ordered step lists. Ingredients are a JSONB array.
#[derive(Debug, Clone)]
pub struct StepRepository {
    pool: PgPool,
}

impl StepRepository {
    /// Create a new step repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StepStore for StepRepository {
    async fn list(&self, recipe_uuid: Uuid) -> AppResult<Vec<RecipeStep>> {
        let rows: Vec<(String, Json<Vec<String>>)> = sqlx::query_as(
            r#"SELECT instruction, ingredients FROM recipe_steps
               WHERE recipe_uuid = $1 ORDER BY step_number"#,
        )
        .bind(recipe_uuid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "failed to get recipe steps", e)
        })?;

        Ok(rows
            .into_iter()
            .map(|(instruction, Json(ingredients))| RecipeStep {
                instruction,
                ingredients,
            })
            .collect())
    }

    async fn replace(&self, recipe_uuid: Uuid, steps: &[RecipeStep]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM recipe_steps WHERE recipe_uuid = $1")
            .bind(recipe_uuid)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "failed to update recipe steps", e)
            })?;

        for (number, step) in steps.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO recipe_steps (recipe_uuid, step_number, instruction, ingredients)
                   VALUES ($1, $2, $3, $4)"#,
            )
            .bind(recipe_uuid)
            .bind(number as i32)
            .bind(&step.instruction)
            .bind(Json(&step.ingredients))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "failed to update recipe steps", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "failed to update recipe steps", e)
        })
    }
}
