//! Warehouse-to-store assignment. Deducts requested quantities from the
//! warehouse product tree and records one priced assignment document, all
//! inside a single transaction: any failing line rolls the whole assignment
//! back.

use crate::db;
use crate::entities::assigned_history::{self, AssignedItem, AssignmentStatus};
use crate::entities::product::{self, encode_variants};
use crate::entities::{store, AssignedHistory, Product, Store};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One requested deduction line.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignmentLine {
    pub product_id: Uuid,
    #[validate(length(min = 1))]
    pub color: String,
    #[validate(length(min = 1))]
    pub size: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Clone)]
pub struct AssignmentService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl AssignmentService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Assigns warehouse stock to a store.
    ///
    /// Lines are processed sequentially on one transaction, so several lines
    /// may deduct from the same product. A line that names unknown stock or
    /// asks for more than is on hand aborts the whole assignment.
    #[instrument(skip(self, lines), fields(store_id = %store_id, lines = lines.len()))]
    pub async fn assign_to_store(
        &self,
        store_id: Uuid,
        lines: Vec<AssignmentLine>,
    ) -> Result<assigned_history::Model, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "assignment requires at least one line".to_string(),
            ));
        }
        for line in &lines {
            line.validate()?;
        }

        let txn = db::begin_stock_txn(&self.db)
            .await
            .map_err(ServiceError::from_write_err)?;

        let result = Self::run_assignment(&txn, store_id, &lines).await;
        match result {
            Ok(entry) => {
                txn.commit().await.map_err(ServiceError::from_write_err)?;
                info!(assignment_id = %entry.id, total = %entry.total_amount, "stock assigned");
                self.event_sender
                    .send_or_log(Event::StockAssigned {
                        store_id,
                        assignment_id: entry.id,
                        total_amount: entry.total_amount,
                    })
                    .await;
                Ok(entry)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(error = %rollback_err, "rollback after failed assignment");
                }
                warn!(error = %err, "assignment aborted; nothing deducted");
                Err(err)
            }
        }
    }

    async fn run_assignment<C: ConnectionTrait>(
        txn: &C,
        store_id: Uuid,
        lines: &[AssignmentLine],
    ) -> Result<assigned_history::Model, ServiceError> {
        let store = Store::find_by_id(store_id)
            .filter(store::Column::IsDeleted.eq(false))
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("store {store_id} not found")))?;

        let mut total_amount = Decimal::ZERO;
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let deducted = deduct_stock(txn, line).await?;
            total_amount += deducted.unit_price * Decimal::from(deducted.quantity_assigned);
            items.push(deducted);
        }

        let entry = assigned_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            store_id: Set(store.id),
            total_amount: Set(total_amount),
            items: Set(serde_json::to_value(&items).map_err(|e| {
                ServiceError::InternalError(format!("failed to encode assignment items: {e}"))
            })?),
            status: Set(AssignmentStatus::Assigned),
            assigned_at: Set(Utc::now()),
            received_at: Set(None),
        }
        .insert(txn)
        .await?;

        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn list_for_store(
        &self,
        store_id: Uuid,
    ) -> Result<Vec<assigned_history::Model>, ServiceError> {
        Store::find_by_id(store_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("store {store_id} not found")))?;

        Ok(AssignedHistory::find()
            .filter(assigned_history::Column::StoreId.eq(store_id))
            .order_by_desc(assigned_history::Column::AssignedAt)
            .all(&*self.db)
            .await?)
    }

    /// Marks an assignment as received at the store.
    #[instrument(skip(self))]
    pub async fn mark_received(
        &self,
        assignment_id: Uuid,
    ) -> Result<assigned_history::Model, ServiceError> {
        let entry = AssignedHistory::find_by_id(assignment_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("assignment {assignment_id} not found"))
            })?;

        if entry.status != AssignmentStatus::Assigned {
            return Err(ServiceError::InvalidOperation(format!(
                "assignment {assignment_id} was already received"
            )));
        }

        let mut active: assigned_history::ActiveModel = entry.into();
        active.status = Set(AssignmentStatus::Received);
        active.received_at = Set(Some(Utc::now()));
        let updated = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::AssignmentReceived(assignment_id))
            .await;
        Ok(updated)
    }
}

/// Deducts one line's quantity from the warehouse tree and returns the
/// priced item for the assignment record.
async fn deduct_stock<C: ConnectionTrait>(
    txn: &C,
    line: &AssignmentLine,
) -> Result<AssignedItem, ServiceError> {
    let product = Product::find_by_id(line.product_id)
        .filter(product::Column::IsDeleted.eq(false))
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("product {} not found", line.product_id)))?;

    let unit_price = product.price.ok_or_else(|| {
        ServiceError::ValidationError(format!(
            "product {} has no unit price; cannot value the assignment",
            product.product_ref
        ))
    })?;

    let color_name = line.color.trim().to_uppercase();
    let size_label = line.size.trim().to_uppercase();
    let product_id = product.id;
    let product_group = product.product_group;

    let mut variants = product.variant_list()?;
    let variant = variants
        .iter_mut()
        .filter(|v| !v.is_deleted)
        .find(|v| v.color.name == color_name)
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "product {} has no {color_name} variant",
                line.product_id
            ))
        })?;
    let color = variant.color.clone();

    let entry = variant.size_entry_mut(&size_label).ok_or_else(|| {
        ServiceError::NotFound(format!(
            "product {} has no size {size_label} in {color_name}",
            line.product_id
        ))
    })?;

    if entry.quantity < line.quantity {
        return Err(ServiceError::InsufficientStock(format!(
            "{color_name}/{size_label}: requested {}, on hand {}",
            line.quantity, entry.quantity
        )));
    }
    entry.quantity -= line.quantity;

    let mut active: product::ActiveModel = product.into();
    active.variants = Set(encode_variants(&variants)?);
    active.updated_at = Set(Utc::now());
    active.update(txn).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => ServiceError::MergeInconsistency(format!(
            "product {product_id} vanished during assignment"
        )),
        other => ServiceError::DatabaseError(other),
    })?;

    Ok(AssignedItem {
        product_id,
        product_group,
        color,
        size: size_label,
        quantity_assigned: line.quantity,
        unit_price,
    })
}
