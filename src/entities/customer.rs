use crate::catalog::ProductGroup;
use crate::entities::product::ColorSpec;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storefront customer. Cart and wishlist are JSON arrays on the row,
/// mirroring the document shape they had before the port; both merge on
/// (product, group, color, size).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub phone: Option<String>,

    /// `Vec<CartItem>`.
    #[sea_orm(column_type = "Json")]
    pub cart: Json,

    /// `Vec<WishlistItem>`.
    #[sea_orm(column_type = "Json")]
    pub wishlist: Json,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub item_id: Uuid,
    pub product_id: Uuid,
    pub product_group: ProductGroup,
    pub color: ColorSpec,
    pub size: String,
    pub quantity: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WishlistItem {
    pub item_id: Uuid,
    pub product_id: Uuid,
    pub product_group: ProductGroup,
    pub color: ColorSpec,
    pub size: String,
}

impl Model {
    pub fn cart_items(&self) -> Result<Vec<CartItem>, crate::errors::ServiceError> {
        serde_json::from_value(self.cart.clone()).map_err(|e| {
            crate::errors::ServiceError::InternalError(format!(
                "customer {} has undecodable cart: {e}",
                self.id
            ))
        })
    }

    pub fn wishlist_items(&self) -> Result<Vec<WishlistItem>, crate::errors::ServiceError> {
        serde_json::from_value(self.wishlist.clone()).map_err(|e| {
            crate::errors::ServiceError::InternalError(format!(
                "customer {} has undecodable wishlist: {e}",
                self.id
            ))
        })
    }
}
