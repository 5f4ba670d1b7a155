//! Recipe file repository implementation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;
use hungr_entity::{File, FileBlob, NewFile};

use crate::store::FileStore;

/// Repository for file records. Bytes are not stored here.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert one file row at the given page.
pub(crate) async fn insert_file(
    conn: &mut PgConnection,
    recipe_uuid: Uuid,
    file: &NewFile,
    page_number: i32,
) -> AppResult<File> {
    sqlx::query_as::<_, File>(
        r#"INSERT INTO files (uuid, recipe_uuid, url, page_number, image, content_type, storage_key)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING uuid, recipe_uuid, url, page_number, image"#,
    )
    .bind(file.uuid)
    .bind(recipe_uuid)
    .bind(File::url_for(file.uuid))
    .bind(page_number)
    .bind(file.is_image())
    .bind(&file.content_type)
    .bind(&file.storage_key)
    .fetch_one(conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to store file", e))
}

#[async_trait]
impl FileStore for FileRepository {
    async fn list_for_recipes(&self, recipe_uuids: &[Uuid]) -> AppResult<Vec<File>> {
        if recipe_uuids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, File>(
            r#"SELECT uuid, recipe_uuid, url, page_number, image
               FROM files WHERE recipe_uuid = ANY($1)
               ORDER BY page_number, created_at"#,
        )
        .bind(recipe_uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "failed to load recipe files", e)
        })
    }

    async fn append(&self, recipe_uuid: Uuid, files: &[NewFile]) -> AppResult<Vec<File>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Serialises concurrent appends to the same recipe.
        sqlx::query("SELECT uuid FROM recipes WHERE uuid = $1 FOR UPDATE")
            .bind(recipe_uuid)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to lock recipe", e))?;

        let max_page: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(page_number), -1) FROM files WHERE recipe_uuid = $1",
        )
        .bind(recipe_uuid)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "failed to load recipe files", e)
        })?;

        let mut stored = Vec::with_capacity(files.len());
        for (offset, file) in files.iter().enumerate() {
            let page = max_page + 1 + offset as i32;
            stored.push(insert_file(&mut tx, recipe_uuid, file, page).await?);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "failed to store files", e))?;

        Ok(stored)
    }

    async fn find_blob(&self, uuid: Uuid) -> AppResult<Option<FileBlob>> {
        sqlx::query_as::<_, FileBlob>(
            "SELECT uuid, recipe_uuid, content_type, storage_key FROM files WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }
}
