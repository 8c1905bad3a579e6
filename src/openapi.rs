//! OpenAPI document and Swagger UI wiring.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::ProductGroup;
use crate::entities::assigned_history::{AssignedItem, AssignmentStatus};
use crate::entities::customer::{CartItem, WishlistItem};
use crate::entities::order::DeliveryStatus;
use crate::entities::product::{ColorSpec, Variant, VariantSize};
use crate::entities::upload_history::{UploadedProduct, UploadedSize, UploadedVariant};
use crate::errors::ErrorResponse;
use crate::handlers;
use crate::ingestion::UploadReceipt;
use crate::services::assignments::AssignmentLine;
use crate::services::customers::{AddToCartInput, AddToWishlistInput, CreateCustomerInput};
use crate::services::orders::CreateOrderInput;
use crate::services::products::ProductView;
use crate::services::stores::{CreateStoreInput, StoreSummary};
use crate::services::upload_history::{UploadDetail, UploadItemView, UploadSummary};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "uniform-api",
        description = "Uniform and apparel retail backend: catalog, carts, orders, bulk CSV inventory ingestion and warehouse-to-store assignment"
    ),
    paths(
        handlers::bulk_upload::upload_csv,
        handlers::upload_history::list_uploads,
        handlers::upload_history::get_upload,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::stores::create_store,
        handlers::stores::list_stores,
        handlers::stores::get_store,
        handlers::assignments::assign_to_store,
        handlers::assignments::list_assignments,
        handlers::assignments::mark_received,
        handlers::customers::create_customer,
        handlers::customers::get_customer,
        handlers::customers::get_cart,
        handlers::customers::add_to_cart,
        handlers::customers::update_cart_item,
        handlers::customers::remove_cart_item,
        handlers::customers::get_wishlist,
        handlers::customers::add_to_wishlist,
        handlers::customers::remove_wishlist_item,
        handlers::customers::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::update_status,
        handlers::health::health,
    ),
    components(schemas(
        ProductGroup,
        ColorSpec,
        Variant,
        VariantSize,
        ProductView,
        UploadReceipt,
        UploadedProduct,
        UploadedVariant,
        UploadedSize,
        UploadSummary,
        UploadItemView,
        UploadDetail,
        CreateStoreInput,
        StoreSummary,
        AssignmentLine,
        AssignmentStatus,
        AssignedItem,
        handlers::assignments::AssignRequest,
        CreateCustomerInput,
        AddToCartInput,
        AddToWishlistInput,
        handlers::customers::UpdateCartItemRequest,
        CartItem,
        WishlistItem,
        CreateOrderInput,
        handlers::orders::UpdateStatusRequest,
        DeliveryStatus,
        ErrorResponse,
    )),
    tags(
        (name = "inventory", description = "Bulk ingestion and upload ledger"),
        (name = "catalog", description = "Product browsing"),
        (name = "stores", description = "Retail stores"),
        (name = "assignments", description = "Warehouse-to-store stock assignment"),
        (name = "customers", description = "Customers, carts and wishlists"),
        (name = "orders", description = "Order placement and lifecycle"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the document at
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
