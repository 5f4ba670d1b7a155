//! Tag catalog handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::TagsResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<TagsResponse>> {
    let tags = state.tag_service.list().await?;
    Ok(Json(TagsResponse { tags }))
}
