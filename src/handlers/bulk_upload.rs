//! Bulk CSV upload endpoint. The request body is the raw CSV document;
//! the path names the product group whose schema the rows follow.

use crate::catalog::ProductGroup;
use crate::errors::ServiceError;
use crate::ingestion::UploadReceipt;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/inventory/:group/uploads", post(upload_csv))
}

/// Ingest one CSV document for a product group.
///
/// The batch is atomic: every row merges and one ledger entry commits, or
/// nothing changes and the error describes the first offending row.
#[utoipa::path(
    post,
    path = "/api/v1/inventory/{group}/uploads",
    params(("group" = String, Path, description = "Product group selector, e.g. HEAL")),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Batch committed", body = UploadReceipt),
        (status = 400, description = "Unknown group or malformed row", body = crate::errors::ErrorResponse),
        (status = 409, description = "Concurrent batch conflict; retry", body = crate::errors::ErrorResponse),
        (status = 422, description = "Value outside the group schema", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn upload_csv(
    State(state): State<AppState>,
    Path(group): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    let group = ProductGroup::parse(&group)?;
    let receipt = state
        .services
        .bulk_uploads
        .process_csv(group, &body)
        .await?;
    Ok(Json(receipt))
}
