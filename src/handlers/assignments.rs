use crate::errors::ServiceError;
use crate::services::assignments::AssignmentLine;
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/stores/:id/assignments",
            post(assign_to_store).get(list_assignments),
        )
        .route("/assignments/:id/receive", post(mark_received))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRequest {
    pub lines: Vec<AssignmentLine>,
}

/// Assign warehouse stock to a store. All lines deduct atomically.
#[utoipa::path(
    post,
    path = "/api/v1/stores/{id}/assignments",
    params(("id" = Uuid, Path, description = "Store id")),
    request_body = AssignRequest,
    responses(
        (status = 201, description = "Stock assigned"),
        (status = 404, description = "Unknown store, product, color or size", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock; nothing deducted", body = crate::errors::ErrorResponse)
    ),
    tag = "assignments"
)]
pub async fn assign_to_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let entry = state
        .services
        .assignments
        .assign_to_store(id, request.lines)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

/// Assignment history for a store, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}/assignments",
    params(("id" = Uuid, Path, description = "Store id")),
    responses(
        (status = 200, description = "Assignments"),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "assignments"
)]
pub async fn list_assignments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.services.assignments.list_for_store(id).await?;
    Ok(Json(ApiResponse::success(entries)))
}

/// Confirm an assignment arrived at the store.
#[utoipa::path(
    post,
    path = "/api/v1/assignments/{id}/receive",
    params(("id" = Uuid, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment received"),
        (status = 400, description = "Assignment already received", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown assignment", body = crate::errors::ErrorResponse)
    ),
    tag = "assignments"
)]
pub async fn mark_received(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let entry = state.services.assignments.mark_received(id).await?;
    Ok(Json(ApiResponse::success(entry)))
}
