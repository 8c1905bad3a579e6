//! Store management: creating the retail stores that receive warehouse
//! stock, plus lookups used by the assignment flow.

use crate::entities::product::short_ref;
use crate::entities::{store, Store};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStoreInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 512))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 4, max = 10))]
    pub pincode: String,
    #[validate(length(min = 1))]
    pub state: String,
    pub commission_percentage: Option<Decimal>,
    #[validate(length(min = 1))]
    pub contact_name: String,
    #[validate(email)]
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoreSummary {
    pub id: Uuid,
    pub store_ref: String,
    pub name: String,
    pub city: String,
}

#[derive(Clone)]
pub struct StoreService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl StoreService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates a store. Name+address and contact email are unique across
    /// live stores.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_store(&self, input: CreateStoreInput) -> Result<store::Model, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let duplicate_location = Store::find()
            .filter(store::Column::Name.eq(input.name.clone()))
            .filter(store::Column::Address.eq(input.address.clone()))
            .filter(store::Column::IsDeleted.eq(false))
            .one(&txn)
            .await?;
        if duplicate_location.is_some() {
            return Err(ServiceError::Conflict(
                "a store with this name and address already exists".to_string(),
            ));
        }

        let duplicate_email = Store::find()
            .filter(store::Column::ContactEmail.eq(input.contact_email.clone()))
            .one(&txn)
            .await?;
        if duplicate_email.is_some() {
            return Err(ServiceError::Conflict(
                "contact email is already in use".to_string(),
            ));
        }

        let model = store::ActiveModel {
            id: Set(Uuid::new_v4()),
            store_ref: Set(short_ref("ST-")),
            name: Set(input.name),
            address: Set(input.address),
            city: Set(input.city),
            pincode: Set(input.pincode),
            state: Set(input.state),
            commission_percentage: Set(input.commission_percentage),
            contact_name: Set(input.contact_name),
            contact_email: Set(input.contact_email),
            contact_phone: Set(input.contact_phone),
            is_deleted: Set(false),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        self.event_sender.send_or_log(Event::StoreCreated(model.id)).await;
        info!(store_ref = %model.store_ref, "store created");
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Result<Vec<StoreSummary>, ServiceError> {
        let stores = Store::find()
            .filter(store::Column::IsDeleted.eq(false))
            .order_by_asc(store::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(stores
            .into_iter()
            .map(|s| StoreSummary {
                id: s.id,
                store_ref: s.store_ref,
                name: s.name,
                city: s.city,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_store(&self, store_id: Uuid) -> Result<store::Model, ServiceError> {
        Store::find_by_id(store_id)
            .filter(store::Column::IsDeleted.eq(false))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("store {store_id} not found")))
    }
}
