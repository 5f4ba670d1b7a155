//! Recipe file handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use uuid::Uuid;

use hungr_core::error::AppError;

use crate::dto::response::FileUploadResponse;
use crate::error::{ApiError, ApiResult};
use crate::extractors::read_uploads;
use crate::handlers::recipe::path_uuid;
use crate::state::AppState;

/// Stored files are immutable.
const FILE_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Served in place of any stored type that is not an image.
const OPAQUE_CONTENT_TYPE: &str = "application/octet-stream";

/// POST /api/recipes/{uuid}/files (multipart `file`)
pub async fn add_files(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    request: Request,
) -> ApiResult<Json<FileUploadResponse>> {
    let recipe_uuid = path_uuid(&raw)?;
    let uploads = read_uploads(request, "file").await?;
    let files = state.file_service.append(recipe_uuid, uploads).await?;

    Ok(Json(FileUploadResponse {
        success: true,
        files,
    }))
}

/// GET /api/files/{uuid}
pub async fn get_file(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Response> {
    let file_uuid =
        Uuid::parse_str(&raw).map_err(|_| ApiError::validation("invalid file uuid"))?;
    let content = state.file_service.open(file_uuid).await?;

    // Only images are rendered inline; anything else the client declared
    // is downloaded as opaque bytes.
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CACHE_CONTROL, FILE_CACHE_CONTROL)
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .header(header::CONTENT_LENGTH, content.data.len());
    builder = if content.content_type.starts_with("image/") {
        builder.header(header::CONTENT_TYPE, content.content_type)
    } else {
        builder
            .header(header::CONTENT_TYPE, OPAQUE_CONTENT_TYPE)
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_uuid}\""),
            )
    };

    builder
        .body(Body::from(content.data))
        .map_err(|e| ApiError::from(AppError::internal(format!("Response build failed: {e}"))))
}
