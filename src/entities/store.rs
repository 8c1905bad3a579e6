use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Retail store that receives warehouse stock through assignments.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub store_ref: String,

    pub name: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub state: String,

    /// Commission the store earns on assigned stock, as a percentage.
    pub commission_percentage: Option<Decimal>,

    pub contact_name: String,
    #[sea_orm(unique)]
    pub contact_email: String,
    pub contact_phone: Option<String>,

    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assigned_history::Entity")]
    Assignments,
}

impl Related<super::assigned_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
