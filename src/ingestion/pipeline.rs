//! Transaction coordinator for bulk uploads. Wraps parse → merge → ledger
//! in one storage transaction: any failure anywhere in the batch rolls back
//! every mutation; success commits exactly once.

use crate::catalog::ProductGroup;
use crate::db;
use crate::entities::upload_history;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::ingestion::ledger::LedgerBuilder;
use crate::ingestion::merge::merge_row;
use crate::ingestion::parser::RowReader;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Result returned to the upload caller after a committed batch.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadReceipt {
    pub status: u16,
    pub message: String,
    pub upload_id: Uuid,
    pub upload_ref: String,
    pub total_amount: Decimal,
}

impl From<upload_history::Model> for UploadReceipt {
    fn from(entry: upload_history::Model) -> Self {
        Self {
            status: 200,
            message: "Data processed successfully.".to_string(),
            upload_id: entry.id,
            upload_ref: entry.upload_ref,
            total_amount: entry.total_amount,
        }
    }
}

/// Service driving one CSV upload batch per invocation.
#[derive(Clone)]
pub struct BulkUploadService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl BulkUploadService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Processes one uploaded CSV document for one product group.
    ///
    /// Either the whole batch lands (product mutations + one ledger entry,
    /// one commit) or nothing changed. Concurrent batches touching the same
    /// products are serialized by the storage layer; a detected write
    /// conflict surfaces as `TransactionConflict` and the caller may retry.
    #[instrument(skip(self, bytes), fields(group = %group, size = bytes.len()))]
    pub async fn process_csv(
        &self,
        group: ProductGroup,
        bytes: &[u8],
    ) -> Result<UploadReceipt, ServiceError> {
        if bytes.is_empty() {
            return Err(ServiceError::ValidationError(
                "uploaded document is empty".to_string(),
            ));
        }

        let txn = db::begin_stock_txn(&self.db)
            .await
            .map_err(ServiceError::from_write_err)?;

        match Self::run_batch(&txn, group, bytes).await {
            Ok((entry, created_products)) => {
                txn.commit().await.map_err(ServiceError::from_write_err)?;
                info!(
                    upload_ref = %entry.upload_ref,
                    total_amount = %entry.total_amount,
                    created = created_products.len(),
                    "inventory upload committed"
                );
                for product_id in created_products {
                    self.event_sender
                        .send_or_log(Event::ProductCreated(product_id))
                        .await;
                }
                self.event_sender
                    .send_or_log(Event::InventoryUploaded {
                        upload_id: entry.id,
                        total_amount: entry.total_amount,
                    })
                    .await;
                Ok(UploadReceipt::from(entry))
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(error = %rollback_err, "rollback after failed upload batch");
                }
                warn!(group = %group, error = %err, "inventory upload aborted; batch rolled back");
                Err(err)
            }
        }
    }

    /// Runs the whole batch on one open transaction. Rows are processed
    /// strictly sequentially: a row's merge decision may depend on an
    /// earlier row's in-batch mutation of the same product.
    async fn run_batch(
        txn: &DatabaseTransaction,
        group: ProductGroup,
        bytes: &[u8],
    ) -> Result<(upload_history::Model, Vec<Uuid>), ServiceError> {
        let mut ledger = LedgerBuilder::new();
        let mut created_products = Vec::new();
        for row in RowReader::new(bytes, group)? {
            let row = row?;
            let outcome = merge_row(txn, &row).await?;
            if outcome.created {
                created_products.push(outcome.product_id);
            }
            ledger.record(&outcome);
        }
        // An empty document still produces a (zero-total) ledger entry.
        let entry = ledger.finalize(txn).await?;
        Ok((entry, created_products))
    }
}
