//! Recipe step handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::UpdateStepsRequest;
use crate::dto::response::{StepsResponse, SuccessResponse};
use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::handlers::recipe::path_uuid;
use crate::state::AppState;

/// GET /api/recipes/{uuid}/steps
pub async fn get_steps(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<StepsResponse>> {
    let uuid = path_uuid(&raw)?;
    let steps = state.step_service.list(uuid).await?;
    Ok(Json(StepsResponse { steps }))
}

/// PUT /api/recipes/{uuid}/steps
pub async fn put_steps(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    JsonBody(req): JsonBody<UpdateStepsRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let uuid = path_uuid(&raw)?;
    state.step_service.replace(uuid, req.steps).await?;
    Ok(Json(SuccessResponse::ok()))
}
