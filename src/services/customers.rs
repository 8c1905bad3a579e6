//! Customer accounts with embedded cart and wishlist documents. Cart lines
//! merge additively on (product, color, size), the same key discipline the
//! warehouse tree uses.

use crate::catalog::hex_for_color;
use crate::entities::customer::{self, CartItem, WishlistItem};
use crate::entities::product::{self, ColorSpec};
use crate::entities::{Customer, Product};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddToCartInput {
    pub product_id: Uuid,
    #[validate(length(min = 1))]
    pub color: String,
    #[validate(length(min = 1))]
    pub size: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddToWishlistInput {
    pub product_id: Uuid,
    #[validate(length(min = 1))]
    pub color: String,
    #[validate(length(min = 1))]
    pub size: String,
}

#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_customer(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        input.validate()?;

        let existing = Customer::find()
            .filter(customer::Column::Email.eq(input.email.clone()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict("email is already in use".to_string()));
        }

        let now = Utc::now();
        let model = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            name: Set(input.name),
            phone: Set(input.phone),
            cart: Set(serde_json::json!([])),
            wishlist: Set(serde_json::json!([])),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        self.event_sender
            .send_or_log(Event::CustomerCreated(model.id))
            .await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: Uuid) -> Result<customer::Model, ServiceError> {
        Customer::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("customer {customer_id} not found")))
    }

    /// Adds a line to the cart, merging additively when the same
    /// (product, color, size) is already present.
    #[instrument(skip(self, input))]
    pub async fn add_to_cart(
        &self,
        customer_id: Uuid,
        input: AddToCartInput,
    ) -> Result<CartItem, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let customer = find_customer(&txn, customer_id).await?;
        let product = find_live_product(&txn, input.product_id).await?;

        let color_name = input.color.trim().to_uppercase();
        let color = ColorSpec {
            hex_code: hex_for_color(&color_name).map(str::to_string),
            name: color_name,
        };
        let size = input.size.trim().to_uppercase();

        let mut cart = customer.cart_items()?;
        let item = match cart.iter_mut().find(|item| {
            item.product_id == product.id && item.color.name == color.name && item.size == size
        }) {
            Some(existing) => {
                existing.quantity += input.quantity;
                existing.clone()
            }
            None => {
                let item = CartItem {
                    item_id: Uuid::new_v4(),
                    product_id: product.id,
                    product_group: product.product_group,
                    color,
                    size,
                    quantity: input.quantity,
                };
                cart.push(item.clone());
                item
            }
        };

        save_cart(&txn, customer, cart).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CartItemAdded {
                customer_id,
                product_id: product.id,
            })
            .await;
        info!(%customer_id, product_id = %product.id, "cart line added");
        Ok(item)
    }

    /// Sets a cart line's quantity; zero or less removes the line.
    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        customer_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<Vec<CartItem>, ServiceError> {
        let txn = self.db.begin().await?;
        let customer = find_customer(&txn, customer_id).await?;

        let mut cart = customer.cart_items()?;
        let position = cart
            .iter()
            .position(|item| item.item_id == item_id)
            .ok_or_else(|| ServiceError::NotFound(format!("cart item {item_id} not found")))?;

        if quantity <= 0 {
            cart.remove(position);
        } else {
            cart[position].quantity = quantity;
        }

        let updated = cart.clone();
        save_cart(&txn, customer, cart).await?;
        txn.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn remove_cart_item(
        &self,
        customer_id: Uuid,
        item_id: Uuid,
    ) -> Result<Vec<CartItem>, ServiceError> {
        self.update_cart_item(customer_id, item_id, 0).await
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, customer_id: Uuid) -> Result<Vec<CartItem>, ServiceError> {
        self.get_customer(customer_id).await?.cart_items()
    }

    /// Adds a wishlist entry; repeating the same key is a no-op returning
    /// the existing entry.
    #[instrument(skip(self, input))]
    pub async fn add_to_wishlist(
        &self,
        customer_id: Uuid,
        input: AddToWishlistInput,
    ) -> Result<WishlistItem, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let customer = find_customer(&txn, customer_id).await?;
        let product = find_live_product(&txn, input.product_id).await?;

        let color_name = input.color.trim().to_uppercase();
        let size = input.size.trim().to_uppercase();

        let mut wishlist = customer.wishlist_items()?;
        if let Some(existing) = wishlist.iter().find(|item| {
            item.product_id == product.id && item.color.name == color_name && item.size == size
        }) {
            let existing = existing.clone();
            txn.commit().await?;
            return Ok(existing);
        }

        let item = WishlistItem {
            item_id: Uuid::new_v4(),
            product_id: product.id,
            product_group: product.product_group,
            color: ColorSpec {
                hex_code: hex_for_color(&color_name).map(str::to_string),
                name: color_name,
            },
            size,
        };
        wishlist.push(item.clone());

        let mut active: customer::ActiveModel = customer.into();
        active.wishlist = Set(serde_json::to_value(&wishlist).map_err(|e| {
            ServiceError::InternalError(format!("failed to encode wishlist: {e}"))
        })?);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;
        txn.commit().await?;

        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn remove_wishlist_item(
        &self,
        customer_id: Uuid,
        item_id: Uuid,
    ) -> Result<Vec<WishlistItem>, ServiceError> {
        let txn = self.db.begin().await?;
        let customer = find_customer(&txn, customer_id).await?;

        let mut wishlist = customer.wishlist_items()?;
        let position = wishlist
            .iter()
            .position(|item| item.item_id == item_id)
            .ok_or_else(|| ServiceError::NotFound(format!("wishlist item {item_id} not found")))?;
        wishlist.remove(position);

        let updated = wishlist.clone();
        let mut active: customer::ActiveModel = customer.into();
        active.wishlist = Set(serde_json::to_value(&wishlist).map_err(|e| {
            ServiceError::InternalError(format!("failed to encode wishlist: {e}"))
        })?);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get_wishlist(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<WishlistItem>, ServiceError> {
        self.get_customer(customer_id).await?.wishlist_items()
    }
}

async fn find_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
) -> Result<customer::Model, ServiceError> {
    Customer::find_by_id(customer_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("customer {customer_id} not found")))
}

async fn find_live_product<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
) -> Result<product::Model, ServiceError> {
    Product::find_by_id(product_id)
        .filter(product::Column::IsDeleted.eq(false))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("product {product_id} not found")))
}

async fn save_cart<C: ConnectionTrait>(
    conn: &C,
    customer: customer::Model,
    cart: Vec<CartItem>,
) -> Result<(), ServiceError> {
    let mut active: customer::ActiveModel = customer.into();
    active.cart = Set(serde_json::to_value(&cart)
        .map_err(|e| ServiceError::InternalError(format!("failed to encode cart: {e}")))?);
    active.updated_at = Set(Utc::now());
    active.update(conn).await?;
    Ok(())
}
