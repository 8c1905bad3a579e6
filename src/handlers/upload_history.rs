use crate::errors::ServiceError;
use crate::services::upload_history::{UploadDetail, UploadSummary};
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inventory/uploads", get(list_uploads))
        .route("/inventory/uploads/:id", get(get_upload))
}

/// List every committed upload batch, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/uploads",
    responses(
        (status = 200, description = "Upload summaries", body = [UploadSummary])
    ),
    tag = "inventory"
)]
pub async fn list_uploads(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let summaries = state.services.upload_history.list().await?;
    Ok(Json(ApiResponse::success(summaries)))
}

/// Flattened per-item detail of one upload batch.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/uploads/{id}",
    params(("id" = Uuid, Path, description = "Upload id")),
    responses(
        (status = 200, description = "Upload detail", body = UploadDetail),
        (status = 404, description = "Unknown upload", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let detail = state.services.upload_history.get(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}
