//! Connection handlers.

use axum::Json;
use axum::extract::{Query, State};
use uuid::Uuid;

use hungr_entity::ConnectionDirection;

use crate::dto::request::{
    CreateConnectionRequest, DeleteConnectionQuery, EmailQuery, ListConnectionsQuery,
};
use crate::dto::response::{ConnectionsResponse, SuccessResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{JsonBody, parse_bool, parse_uuid, require};
use crate::state::AppState;

/// POST /api/connections?email=
pub async fn create_connection(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
    JsonBody(req): JsonBody<CreateConnectionRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let email = require(&query.email, "email")?;
    let target = req.target_user_uuid.unwrap_or(Uuid::nil());
    state.connection_service.create(email, target).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/connections?user_uuid=&direction=outgoing|incoming
pub async fn list_connections(
    State(state): State<AppState>,
    Query(query): Query<ListConnectionsQuery>,
) -> ApiResult<Json<ConnectionsResponse>> {
    let user = parse_uuid(&query.user_uuid, "user_uuid")?;
    let direction = match query.direction.as_deref().map(str::trim) {
        None | Some("") => ConnectionDirection::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::validation("invalid direction"))?,
    };

    let connections = state.connection_service.list(user, direction).await?;
    Ok(Json(ConnectionsResponse {
        success: true,
        connections,
    }))
}

/// DELETE /api/connections?email=&target_user_uuid=&bidirectional=
pub async fn delete_connection(
    State(state): State<AppState>,
    Query(query): Query<DeleteConnectionQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let email = require(&query.email, "email")?;
    let target = parse_uuid(&query.target_user_uuid, "target_user_uuid")?;
    let bidirectional = match query.bidirectional.as_deref() {
        None | Some("") => false,
        Some(raw) => {
            parse_bool(raw).ok_or_else(|| ApiError::validation("invalid bidirectional flag"))?
        }
    };

    state
        .connection_service
        .delete(email, target, bidirectional)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
