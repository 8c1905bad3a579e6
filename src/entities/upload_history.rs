use crate::catalog::ProductGroup;
use crate::entities::product::ColorSpec;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Audit record of one ingestion batch. Immutable once committed: the
/// `products` column stores per-color per-size *delta* quantities, while the
/// product rows themselves store the running totals.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "upload_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub upload_ref: String,

    /// Monetary value of the batch: sum over every affected size entry of
    /// delta quantity times the product's unit price.
    pub total_amount: Decimal,

    /// `Vec<UploadedProduct>` delta tree.
    #[sea_orm(column_type = "Json")]
    pub products: Json,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Delta quantity a batch added to one size of one color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedSize {
    pub size: String,
    pub quantity_of_upload: i32,
}

/// Per-color slice of a batch's deltas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedVariant {
    pub color: ColorSpec,
    pub sizes: Vec<UploadedSize>,
}

/// Per-product slice of a batch's deltas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadedProduct {
    pub product_id: Uuid,
    pub product_group: ProductGroup,
    pub variants: Vec<UploadedVariant>,
}

impl Model {
    pub fn product_deltas(&self) -> Result<Vec<UploadedProduct>, crate::errors::ServiceError> {
        serde_json::from_value(self.products.clone()).map_err(|e| {
            crate::errors::ServiceError::InternalError(format!(
                "upload entry {} has undecodable products: {e}",
                self.upload_ref
            ))
        })
    }
}
