//! User management handlers.

use axum::Json;
use axum::extract::{Query, State};
use uuid::Uuid;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest, UserLookupQuery, UuidQuery};
use crate::dto::response::{SuccessResponse, UserResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{JsonBody, parse_uuid};
use crate::state::AppState;

/// GET /api/users?uuid=|email=
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserLookupQuery>,
) -> ApiResult<Json<UserResponse>> {
    let uuid = query.uuid.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let email = query.email.as_deref().map(str::trim).filter(|v| !v.is_empty());

    let user = match (uuid, email) {
        (Some(raw), _) => {
            let uuid = Uuid::parse_str(raw).map_err(|_| ApiError::validation("invalid uuid"))?;
            state.user_service.get(uuid).await?
        }
        (None, Some(email)) => state.user_service.get_by_email(email).await?,
        (None, None) => return Err(ApiError::validation("uuid or email is required")),
    };

    Ok(Json(UserResponse::ok(user)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.create(&req.email, &req.name).await?;
    Ok(Json(UserResponse::ok(user)))
}

/// PUT /api/users?uuid=
pub async fn update_user(
    State(state): State<AppState>,
    Query(query): Query<UuidQuery>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let uuid = parse_uuid(&query.uuid, "uuid")?;
    let user = state.user_service.rename(uuid, &req.name).await?;
    Ok(Json(UserResponse::ok(user)))
}

/// DELETE /api/users?uuid=
pub async fn delete_user(
    State(state): State<AppState>,
    Query(query): Query<UuidQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let uuid = parse_uuid(&query.uuid, "uuid")?;
    state.user_service.delete(uuid).await?;
    Ok(Json(SuccessResponse::ok()))
}
