//! Recipe handlers.

use axum::Json;
use axum::extract::{Path, Query, Request, State};
use uuid::Uuid;

use hungr_service::{CreateRecipeInput, PublicRecipe, RecipePatch};

use crate::dto::request::{CreateRecipeQuery, EmailQuery, PatchRecipeRequest, UuidQuery};
use crate::dto::response::{RecipesResponse, SuccessResponse, UploadResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{JsonBody, parse_uuid, read_uploads};
use crate::state::AppState;

/// Parse a `{uuid}` path segment.
pub(crate) fn path_uuid(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("invalid uuid"))
}

/// GET /api/recipes?email=
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<RecipesResponse>> {
    let email = query.email.unwrap_or_default();
    let listing = state.recipe_service.list_visible(&email).await?;

    Ok(Json(RecipesResponse {
        recipe_data: listing.recipes,
        file_data: listing.files,
    }))
}

/// POST /api/recipes?email=&name=&tagString=&source= (multipart `file`)
pub async fn create_recipe(
    State(state): State<AppState>,
    Query(query): Query<CreateRecipeQuery>,
    request: Request,
) -> ApiResult<Json<UploadResponse>> {
    let uploads = read_uploads(request, "file").await?;

    let created = state
        .recipe_service
        .create(CreateRecipeInput {
            owner_email: query.email.unwrap_or_default(),
            name: query.name.unwrap_or_default(),
            tag_string: query.tag_string.unwrap_or_default(),
            source: query.source,
            uploads,
        })
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        recipe: created.recipe,
        tags: created.tags,
        files: created.files,
    }))
}

/// DELETE /api/recipes?uuid=
pub async fn delete_recipe(
    State(state): State<AppState>,
    Query(query): Query<UuidQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let uuid = parse_uuid(&query.uuid, "uuid")?;
    state.recipe_service.delete(uuid).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// PATCH /api/recipes/{uuid}
pub async fn patch_recipe(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    JsonBody(req): JsonBody<PatchRecipeRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let uuid = path_uuid(&raw)?;
    state
        .recipe_service
        .update(
            uuid,
            RecipePatch {
                tag_string: req.tag_string,
                source: req.source,
                is_public: req.is_public,
            },
        )
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/recipes/{uuid}/public
pub async fn get_public_recipe(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<PublicRecipe>> {
    let uuid = path_uuid(&raw)?;
    let recipe = state.recipe_service.get_public(uuid).await?;
    Ok(Json(recipe))
}
