//! HTTP route handlers and router composition.

pub mod assignments;
pub mod bulk_upload;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
pub mod stores;
pub mod upload_history;

use crate::events::EventSender;
use crate::ingestion::BulkUploadService;
use crate::services::{
    AssignmentService, CustomerService, OrderService, ProductCatalogService, StoreService,
    UploadHistoryService,
};
use crate::AppState;
use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Aggregates the per-entity services handlers dispatch into.
#[derive(Clone)]
pub struct AppServices {
    pub bulk_uploads: BulkUploadService,
    pub products: ProductCatalogService,
    pub stores: StoreService,
    pub assignments: AssignmentService,
    pub upload_history: UploadHistoryService,
    pub customers: CustomerService,
    pub orders: OrderService,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self {
            bulk_uploads: BulkUploadService::new(db.clone(), event_sender.clone()),
            products: ProductCatalogService::new(db.clone()),
            stores: StoreService::new(db.clone(), event_sender.clone()),
            assignments: AssignmentService::new(db.clone(), event_sender.clone()),
            upload_history: UploadHistoryService::new(db.clone()),
            customers: CustomerService::new(db.clone(), event_sender.clone()),
            orders: OrderService::new(db, event_sender),
        }
    }
}

/// Full `/api/v1` surface.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(bulk_upload::router())
        .merge(upload_history::router())
        .merge(products::router())
        .merge(stores::router())
        .merge(assignments::router())
        .merge(customers::router())
        .merge(orders::router())
        .merge(health::router())
}
