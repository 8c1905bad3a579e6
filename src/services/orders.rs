//! Order placement and lifecycle. Placing an order deducts stock from the
//! warehouse tree in the same transaction that writes the order row;
//! cancelling before delivery restocks it.

use crate::db;
use crate::entities::order::{self, DeliveryStatus};
use crate::entities::product::{self, encode_variants, short_ref, ColorSpec};
use crate::entities::{Customer, Order, Product};
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

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrderInput {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    #[validate(length(min = 1))]
    pub color: String,
    #[validate(length(min = 1))]
    pub size: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub delivery_charges: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
}

#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Places an order for one product/color/size line, deducting the
    /// ordered quantity from warehouse stock.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id))]
    pub async fn create_order(&self, input: CreateOrderInput) -> Result<order::Model, ServiceError> {
        input.validate()?;

        let txn = db::begin_stock_txn(&self.db)
            .await
            .map_err(ServiceError::from_write_err)?;

        match Self::run_order(&txn, &input).await {
            Ok(model) => {
                txn.commit().await.map_err(ServiceError::from_write_err)?;
                info!(order_ref = %model.order_ref, total = %model.total_price, "order placed");
                self.event_sender.send_or_log(Event::OrderCreated(model.id)).await;
                Ok(model)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(error = %rollback_err, "rollback after failed order");
                }
                warn!(error = %err, "order aborted; stock unchanged");
                Err(err)
            }
        }
    }

    async fn run_order<C: ConnectionTrait>(
        txn: &C,
        input: &CreateOrderInput,
    ) -> Result<order::Model, ServiceError> {
        Customer::find_by_id(input.customer_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("customer {} not found", input.customer_id))
            })?;

        let product = Product::find_by_id(input.product_id)
            .filter(product::Column::IsDeleted.eq(false))
            .one(txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("product {} not found", input.product_id))
            })?;

        let unit_price = product.price.ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "product {} has no unit price; cannot be ordered",
                product.product_ref
            ))
        })?;

        let color_name = input.color.trim().to_uppercase();
        let size_label = input.size.trim().to_uppercase();
        let product_id = product.id;
        let product_group = product.product_group;

        let mut variants = product.variant_list()?;
        let variant = variants
            .iter_mut()
            .filter(|v| !v.is_deleted)
            .find(|v| v.color.name == color_name)
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "product {} is not available in {color_name}",
                    input.product_id
                ))
            })?;
        let color = variant.color.clone();

        let entry = variant.size_entry_mut(&size_label).ok_or_else(|| {
            ServiceError::NotFound(format!(
                "product {} has no size {size_label} in {color_name}",
                input.product_id
            ))
        })?;
        if entry.quantity < input.quantity {
            return Err(ServiceError::InsufficientStock(format!(
                "{color_name}/{size_label}: requested {}, on hand {}",
                input.quantity, entry.quantity
            )));
        }
        entry.quantity -= input.quantity;

        let mut active: product::ActiveModel = product.into();
        active.variants = Set(encode_variants(&variants)?);
        active.updated_at = Set(Utc::now());
        active.update(txn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::MergeInconsistency(format!(
                "product {product_id} vanished during order placement"
            )),
            other => ServiceError::DatabaseError(other),
        })?;

        let delivery_charges = input.delivery_charges.unwrap_or(Decimal::ZERO);
        let discount_percentage = input.discount_percentage.unwrap_or(Decimal::ZERO);
        let subtotal = unit_price * Decimal::from(input.quantity);
        let discount = subtotal * discount_percentage / Decimal::from(100);
        let total_price = subtotal - discount + delivery_charges;

        let model = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_ref: Set(short_ref("ORD-")),
            customer_id: Set(input.customer_id),
            product_id: Set(product_id),
            product_group: Set(product_group),
            color: Set(serde_json::to_value(&color).map_err(|e| {
                ServiceError::InternalError(format!("failed to encode order color: {e}"))
            })?),
            size: Set(size_label),
            quantity: Set(input.quantity),
            unit_price: Set(unit_price),
            delivery_charges: Set(delivery_charges),
            discount_percentage: Set(discount_percentage),
            total_price: Set(total_price),
            delivery_status: Set(DeliveryStatus::Pending),
            created_at: Set(Utc::now()),
            delivered_at: Set(None),
        }
        .insert(txn)
        .await?;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<order::Model, ServiceError> {
        Order::find_by_id(order_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {order_id} not found")))
    }

    #[instrument(skip(self))]
    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<order::Model>, ServiceError> {
        Customer::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("customer {customer_id} not found")))?;

        Ok(Order::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    /// Moves an order along its delivery lifecycle. Cancelling an
    /// undelivered order restores the deducted stock in the same
    /// transaction.
    #[instrument(skip(self))]
    pub async fn update_delivery_status(
        &self,
        order_id: Uuid,
        next: DeliveryStatus,
    ) -> Result<order::Model, ServiceError> {
        let txn = db::begin_stock_txn(&self.db)
            .await
            .map_err(ServiceError::from_write_err)?;

        let result = Self::run_status_change(&txn, order_id, next).await;
        match result {
            Ok((model, old_status)) => {
                txn.commit().await.map_err(ServiceError::from_write_err)?;
                self.event_sender
                    .send_or_log(Event::OrderStatusChanged {
                        order_id,
                        old_status: format!("{old_status:?}").to_uppercase(),
                        new_status: format!("{next:?}").to_uppercase(),
                    })
                    .await;
                Ok(model)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(error = %rollback_err, "rollback after failed status change");
                }
                Err(err)
            }
        }
    }

    async fn run_status_change<C: ConnectionTrait>(
        txn: &C,
        order_id: Uuid,
        next: DeliveryStatus,
    ) -> Result<(order::Model, DeliveryStatus), ServiceError> {
        let model = Order::find_by_id(order_id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {order_id} not found")))?;

        let current = model.delivery_status;
        if !current.can_transition_to(next) {
            return Err(ServiceError::InvalidOperation(format!(
                "order {order_id} cannot move from {current:?} to {next:?}"
            )));
        }

        if next == DeliveryStatus::Cancelled {
            restock(txn, &model).await?;
        }

        let mut active: order::ActiveModel = model.into();
        active.delivery_status = Set(next);
        if next == DeliveryStatus::Delivered {
            active.delivered_at = Set(Some(Utc::now()));
        }
        let updated = active.update(txn).await?;
        Ok((updated, current))
    }
}

/// Returns a cancelled order's quantity to the warehouse tree.
async fn restock<C: ConnectionTrait>(txn: &C, model: &order::Model) -> Result<(), ServiceError> {
    let product = Product::find_by_id(model.product_id)
        .one(txn)
        .await?
        .ok_or_else(|| {
            ServiceError::MergeInconsistency(format!(
                "order {} references missing product {}",
                model.order_ref, model.product_id
            ))
        })?;

    let color: ColorSpec = serde_json::from_value(model.color.clone()).map_err(|e| {
        ServiceError::InternalError(format!("order {} has undecodable color: {e}", model.order_ref))
    })?;

    let mut variants = product.variant_list()?;
    let variant = variants
        .iter_mut()
        .find(|v| v.color.name == color.name)
        .ok_or_else(|| {
            ServiceError::MergeInconsistency(format!(
                "order {} references missing variant {}",
                model.order_ref, color.name
            ))
        })?;
    match variant.size_entry_mut(&model.size) {
        Some(entry) => entry.quantity += model.quantity,
        None => variant.sizes.push(product::VariantSize {
            size: model.size.clone(),
            quantity: model.quantity,
        }),
    }

    let mut active: product::ActiveModel = product.into();
    active.variants = Set(encode_variants(&variants)?);
    active.updated_at = Set(Utc::now());
    active.update(txn).await?;
    Ok(())
}
