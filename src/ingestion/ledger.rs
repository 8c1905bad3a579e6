//! Upload ledger. Accumulates the per-row merge outcomes of one batch into
//! a delta tree (product → color → size) and finalizes it as one immutable
//! `upload_history` row.

use crate::entities::product::short_ref;
use crate::entities::upload_history::{
    self, UploadedProduct, UploadedSize, UploadedVariant,
};
use crate::entities::Product;
use crate::errors::ServiceError;
use crate::ingestion::merge::MergeOutcome;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use uuid::Uuid;

/// Order-preserving accumulator for one batch's deltas. Multiple rows
/// touching the same (product, color, size) triple sum into one slot.
#[derive(Debug, Default)]
pub struct LedgerBuilder {
    products: Vec<UploadedProduct>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn record(&mut self, outcome: &MergeOutcome) {
        let product_idx = match self
            .products
            .iter()
            .position(|p| p.product_id == outcome.product_id)
        {
            Some(idx) => idx,
            None => {
                self.products.push(UploadedProduct {
                    product_id: outcome.product_id,
                    product_group: outcome.product_group,
                    variants: Vec::new(),
                });
                self.products.len() - 1
            }
        };
        let product = &mut self.products[product_idx];

        let variant_idx = match product
            .variants
            .iter()
            .position(|v| v.color.name == outcome.color.name)
        {
            Some(idx) => idx,
            None => {
                product.variants.push(UploadedVariant {
                    color: outcome.color.clone(),
                    sizes: Vec::new(),
                });
                product.variants.len() - 1
            }
        };
        let variant = &mut product.variants[variant_idx];

        match variant.sizes.iter_mut().find(|s| s.size == outcome.size) {
            Some(slot) => slot.quantity_of_upload += outcome.quantity_delta,
            None => variant.sizes.push(UploadedSize {
                size: outcome.size.clone(),
                quantity_of_upload: outcome.quantity_delta,
            }),
        }
    }

    /// Prices the accumulated deltas at each product's current unit price
    /// and persists the batch's single ledger row. An empty batch is valid
    /// and records a zero total.
    pub async fn finalize<C: ConnectionTrait>(
        self,
        conn: &C,
    ) -> Result<upload_history::Model, ServiceError> {
        let mut total_amount = Decimal::ZERO;
        for product_delta in &self.products {
            let product = Product::find_by_id(product_delta.product_id)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    ServiceError::MergeInconsistency(format!(
                        "ledger references product {} which no longer exists",
                        product_delta.product_id
                    ))
                })?;
            let unit_price = product.price.unwrap_or(Decimal::ZERO);
            for variant in &product_delta.variants {
                for size in &variant.sizes {
                    total_amount += unit_price * Decimal::from(size.quantity_of_upload);
                }
            }
        }

        let products = serde_json::to_value(&self.products).map_err(|e| {
            ServiceError::InternalError(format!("failed to encode upload deltas: {e}"))
        })?;

        let entry = upload_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            upload_ref: Set(short_ref("")),
            total_amount: Set(total_amount),
            products: Set(products),
            created_at: Set(Utc::now()),
        }
        .insert(conn)
        .await?;

        Ok(entry)
    }
}
