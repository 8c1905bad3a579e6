//! Read side of the upload ledger: batch summaries and the flattened
//! per-item detail of one batch.

use crate::catalog::ProductGroup;
use crate::entities::product::ColorSpec;
use crate::entities::{upload_history, Product, UploadHistory};
use crate::errors::ServiceError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadSummary {
    pub upload_id: Uuid,
    pub upload_ref: String,
    pub date_of_upload: DateTime<Utc>,
    pub total_amount: Decimal,
}

/// One flattened (product, color, size) delta of a batch, joined with the
/// product's current identity fields and price.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadItemView {
    pub product_id: Uuid,
    pub product_ref: String,
    pub product_group: ProductGroup,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub gender: Option<String>,
    pub product_type: Option<String>,
    pub color: ColorSpec,
    pub size: String,
    pub quantity_of_upload: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadDetail {
    pub upload_id: Uuid,
    pub upload_ref: String,
    pub date_of_upload: DateTime<Utc>,
    /// Total recorded when the batch committed.
    pub total_amount: Decimal,
    /// Total recomputed from the items at today's prices.
    pub total_price: Decimal,
    pub items: Vec<UploadItemView>,
}

#[derive(Clone)]
pub struct UploadHistoryService {
    db: Arc<DatabaseConnection>,
}

impl UploadHistoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<UploadSummary>, ServiceError> {
        let entries = UploadHistory::find()
            .order_by_desc(upload_history::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(entries
            .into_iter()
            .map(|e| UploadSummary {
                upload_id: e.id,
                upload_ref: e.upload_ref,
                date_of_upload: e.created_at,
                total_amount: e.total_amount,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, upload_id: Uuid) -> Result<UploadDetail, ServiceError> {
        let entry = UploadHistory::find_by_id(upload_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("upload {upload_id} not found")))?;

        let mut items = Vec::new();
        let mut total_price = Decimal::ZERO;
        for delta in entry.product_deltas()? {
            // Ingestion never deletes products, so a missing row here means
            // the ledger lost referential integrity.
            let product = Product::find_by_id(delta.product_id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::MergeInconsistency(format!(
                        "upload {} references missing product {}",
                        entry.upload_ref, delta.product_id
                    ))
                })?;
            let unit_price = product.price.unwrap_or(Decimal::ZERO);

            for variant in delta.variants {
                for size in variant.sizes {
                    total_price += unit_price * Decimal::from(size.quantity_of_upload);
                    items.push(UploadItemView {
                        product_id: product.id,
                        product_ref: product.product_ref.clone(),
                        product_group: product.product_group,
                        category: product.category.clone(),
                        sub_category: product.sub_category.clone(),
                        gender: product.gender.clone(),
                        product_type: product.product_type.clone(),
                        color: variant.color.clone(),
                        size: size.size,
                        quantity_of_upload: size.quantity_of_upload,
                        unit_price,
                    });
                }
            }
        }

        Ok(UploadDetail {
            upload_id: entry.id,
            upload_ref: entry.upload_ref,
            date_of_upload: entry.created_at,
            total_amount: entry.total_amount,
            total_price,
            items,
        })
    }
}
