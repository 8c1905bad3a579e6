use crate::catalog::ProductGroup;
use crate::entities::product::ColorSpec;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Record of one warehouse-to-store assignment. Like the upload ledger it
/// stores deducted quantities per product/color/size, priced at assignment
/// time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assigned_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub store_id: Uuid,

    pub total_amount: Decimal,

    /// `Vec<AssignedItem>`.
    #[sea_orm(column_type = "Json")]
    pub items: Json,

    pub status: AssignmentStatus,

    pub assigned_at: DateTime<Utc>,
    pub received_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id"
    )]
    Store,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AssignmentStatus {
    #[sea_orm(string_value = "ASSIGNED")]
    #[serde(rename = "ASSIGNED")]
    Assigned,
    #[sea_orm(string_value = "RECEIVED")]
    #[serde(rename = "RECEIVED")]
    Received,
}

/// One deducted line of an assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssignedItem {
    pub product_id: Uuid,
    pub product_group: ProductGroup,
    pub color: ColorSpec,
    pub size: String,
    pub quantity_assigned: i32,
    pub unit_price: Decimal,
}

impl Model {
    pub fn item_list(&self) -> Result<Vec<AssignedItem>, crate::errors::ServiceError> {
        serde_json::from_value(self.items.clone()).map_err(|e| {
            crate::errors::ServiceError::InternalError(format!(
                "assignment {} has undecodable items: {e}",
                self.id
            ))
        })
    }
}
