use crate::errors::ServiceError;
use crate::services::stores::{CreateStoreInput, StoreSummary};
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stores", post(create_store).get(list_stores))
        .route("/stores/:id", get(get_store))
}

/// Register a new retail store.
#[utoipa::path(
    post,
    path = "/api/v1/stores",
    request_body = CreateStoreInput,
    responses(
        (status = 201, description = "Store created"),
        (status = 409, description = "Name+address or contact email already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "stores"
)]
pub async fn create_store(
    State(state): State<AppState>,
    Json(input): Json<CreateStoreInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let store = state.services.stores.create_store(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(store))))
}

/// Store names and ids for pickers.
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    responses((status = 200, description = "Stores", body = [StoreSummary])),
    tag = "stores"
)]
pub async fn list_stores(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stores = state.services.stores.list_stores().await?;
    Ok(Json(ApiResponse::success(stores)))
}

/// Full store detail.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}",
    params(("id" = Uuid, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store detail"),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "stores"
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let store = state.services.stores.get_store(id).await?;
    Ok(Json(ApiResponse::success(store)))
}
