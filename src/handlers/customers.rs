use crate::errors::ServiceError;
use crate::services::customers::{AddToCartInput, AddToWishlistInput, CreateCustomerInput};
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/:id", get(get_customer))
        .route("/customers/:id/cart", get(get_cart).post(add_to_cart))
        .route(
            "/customers/:id/cart/:item_id",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route(
            "/customers/:id/wishlist",
            get(get_wishlist).post(add_to_wishlist),
        )
        .route("/customers/:id/wishlist/:item_id", delete(remove_wishlist_item))
        .route("/customers/:id/orders", get(list_orders))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// Register a storefront customer.
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    request_body = CreateCustomerInput,
    responses(
        (status = 201, description = "Customer created"),
        (status = 409, description = "Email already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomerInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.create_customer(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(customer))))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer detail"),
        (status = 404, description = "Unknown customer", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.get_customer(id).await?;
    Ok(Json(ApiResponse::success(customer)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/cart",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses((status = 200, description = "Cart lines")),
    tag = "customers"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let cart = state.services.customers.get_cart(id).await?;
    Ok(Json(ApiResponse::success(cart)))
}

/// Add a line to the cart; the same product/color/size merges additively.
#[utoipa::path(
    post,
    path = "/api/v1/customers/{id}/cart",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = AddToCartInput,
    responses(
        (status = 200, description = "Line added or merged"),
        (status = 404, description = "Unknown customer or product", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AddToCartInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.customers.add_to_cart(id, input).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Set a cart line's quantity; zero removes the line.
#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}/cart/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Customer id"),
        ("item_id" = Uuid, Path, description = "Cart line id")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Updated cart"),
        (status = 404, description = "Unknown cart line", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let cart = state
        .services
        .customers
        .update_cart_item(id, item_id, request.quantity)
        .await?;
    Ok(Json(ApiResponse::success(cart)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}/cart/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Customer id"),
        ("item_id" = Uuid, Path, description = "Cart line id")
    ),
    responses(
        (status = 200, description = "Updated cart"),
        (status = 404, description = "Unknown cart line", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    let cart = state.services.customers.remove_cart_item(id, item_id).await?;
    Ok(Json(ApiResponse::success(cart)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/wishlist",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses((status = 200, description = "Wishlist entries")),
    tag = "customers"
)]
pub async fn get_wishlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let wishlist = state.services.customers.get_wishlist(id).await?;
    Ok(Json(ApiResponse::success(wishlist)))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers/{id}/wishlist",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = AddToWishlistInput,
    responses(
        (status = 200, description = "Entry added (idempotent)"),
        (status = 404, description = "Unknown customer or product", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AddToWishlistInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.customers.add_to_wishlist(id, input).await?;
    Ok(Json(ApiResponse::success(item)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}/wishlist/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Customer id"),
        ("item_id" = Uuid, Path, description = "Wishlist entry id")
    ),
    responses(
        (status = 200, description = "Updated wishlist"),
        (status = 404, description = "Unknown wishlist entry", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn remove_wishlist_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    let wishlist = state
        .services
        .customers
        .remove_wishlist_item(id, item_id)
        .await?;
    Ok(Json(ApiResponse::success(wishlist)))
}

/// Order history for one customer, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/orders",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Orders"),
        (status = 404, description = "Unknown customer", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.orders.list_for_customer(id).await?;
    Ok(Json(ApiResponse::success(orders)))
}
