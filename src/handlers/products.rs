use crate::catalog::ProductGroup;
use crate::errors::ServiceError;
use crate::services::products::{ProductFilter, ProductView};
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products/:group", get(list_products))
        .route("/products/:group/:product_ref", get(get_product))
}

/// Browse one group's catalog with optional identity-field filters.
#[utoipa::path(
    get,
    path = "/api/v1/products/{group}",
    params(
        ("group" = String, Path, description = "Product group selector"),
        ProductFilter
    ),
    responses(
        (status = 200, description = "Matching products", body = [ProductView]),
        (status = 400, description = "Unknown group", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Path(group): Path<String>,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let group = ProductGroup::parse(&group)?;
    let products = state.services.products.list_products(group, filter).await?;
    Ok(Json(ApiResponse::success(products)))
}

/// One product with per-color availability.
#[utoipa::path(
    get,
    path = "/api/v1/products/{group}/{product_ref}",
    params(
        ("group" = String, Path, description = "Product group selector"),
        ("product_ref" = String, Path, description = "Product business ref")
    ),
    responses(
        (status = 200, description = "Product detail", body = ProductView),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path((group, product_ref)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServiceError> {
    let group = ProductGroup::parse(&group)?;
    let product = state
        .services
        .products
        .get_product(group, product_ref.trim())
        .await?;
    Ok(Json(ApiResponse::success(product)))
}
