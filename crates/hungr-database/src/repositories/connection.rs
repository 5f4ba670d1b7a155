//! User connection repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;
use hungr_entity::User;

use crate::store::ConnectionStore;

/// Repository for directed user connections.
#[derive(Debug, Clone)]
pub struct ConnectionRepository {
    pool: PgPool,
}

impl ConnectionRepository {
    /// Create a new connection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionStore for ConnectionRepository {
    async fn create(&self, source: Uuid, target: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"INSERT INTO user_connections (source_user_uuid, target_user_uuid)
               VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(source)
        .bind(target)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "failed to create connection", e)
        })?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_targets(&self, user: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"SELECT u.uuid, u.email, u.name, u.created_at
               FROM user_connections uc
               JOIN users u ON u.uuid = uc.target_user_uuid
               WHERE uc.source_user_uuid = $1
               ORDER BY u.name"#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to get connections", e))
    }

    async fn list_sources(&self, user: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"SELECT u.uuid, u.email, u.name, u.created_at
               FROM user_connections uc
               JOIN users u ON u.uuid = uc.source_user_uuid
               WHERE uc.target_user_uuid = $1
               ORDER BY u.name"#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to get connections", e))
    }

    async fn delete(&self, source: Uuid, target: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM user_connections WHERE source_user_uuid = $1 AND target_user_uuid = $2",
        )
        .bind(source)
        .bind(target)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "failed to delete connection", e)
        })?;
        Ok(result.rows_affected() > 0)
    }
}
