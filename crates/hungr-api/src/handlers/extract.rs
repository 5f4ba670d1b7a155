//! AI recipe extraction handlers.

use axum::Json;
use axum::extract::{Request, State};

use hungr_service::extraction::ExtractedRecipe;

use crate::dto::request::{ExtractTextRequest, ExtractUrlRequest};
use crate::error::ApiResult;
use crate::extractors::{JsonBody, read_uploads};
use crate::state::AppState;

/// POST /api/extract-recipe
pub async fn from_url(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ExtractUrlRequest>,
) -> ApiResult<Json<ExtractedRecipe>> {
    let recipe = state.extraction_service.from_url(&req.url).await?;
    Ok(Json(recipe))
}

/// POST /api/extract-recipe-image (multipart `images`)
pub async fn from_images(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<Json<ExtractedRecipe>> {
    let uploads = read_uploads(request, "images").await?;
    let recipe = state.extraction_service.from_images(uploads).await?;
    Ok(Json(recipe))
}

/// POST /api/extract-recipe-text
pub async fn from_text(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ExtractTextRequest>,
) -> ApiResult<Json<ExtractedRecipe>> {
    let recipe = state.extraction_service.from_text(&req.text).await?;
    Ok(Json(recipe))
}
