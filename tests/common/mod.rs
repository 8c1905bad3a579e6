//! Shared test bootstrap: in-memory SQLite with migrations applied and the
//! full service set wired to a drained event channel.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tokio::sync::mpsc;
use uniform_api::events::EventSender;
use uniform_api::handlers::AppServices;
use uniform_api::migrator::Migrator;

pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("in-memory sqlite connection");
        Migrator::up(&db, None).await.expect("migrations apply");

        let (event_tx, mut event_rx) = mpsc::channel(64);
        tokio::spawn(async move { while event_rx.recv().await.is_some() {} });
        let event_sender = EventSender::new(event_tx);

        let db = Arc::new(db);
        let services = AppServices::new(db.clone(), event_sender);
        Self { db, services }
    }
}

/// Header row shared by the HEAL upload fixtures.
pub const HEAL_HEADER: &str = "groupName,groupImageUrl,categoryName,categoryImageUrl,subCategoryName,subCategoryImageUrl,gender,productType,productTypeImageUrl,fit,sleeves,fabric,price,productDetails,variantColor,variantSize,variantQuantity,variantImages";

/// Builds a HEAL CSV document from data rows.
pub fn heal_csv(rows: &[&str]) -> Vec<u8> {
    let mut doc = String::from(HEAL_HEADER);
    for row in rows {
        doc.push('\n');
        doc.push_str(row);
    }
    doc.into_bytes()
}

/// One HEAL scrub-top row with the given color/size/quantity/price.
pub fn heal_row(color: &str, size: &str, quantity: &str, price: &str) -> String {
    format!(
        "HEAL,https://img/heal.png,SCRUBS,https://img/scrubs.png,NURSE SCRUB SETS,https://img/nss.png,WOMEN,TOP,https://img/top.png,CLASSIC,SHORT SLEEVES,POLY COTTON,{price},Breathable scrub top,{color},{size},{quantity},https://img/v1.jpg"
    )
}
