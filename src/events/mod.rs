//! Domain events. Services publish to a bounded mpsc channel; a background
//! consumer logs them. Delivery is best-effort and never blocks the request
//! path beyond channel capacity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ProductCreated(Uuid),
    InventoryUploaded {
        upload_id: Uuid,
        total_amount: Decimal,
    },
    StockAssigned {
        store_id: Uuid,
        assignment_id: Uuid,
        total_amount: Decimal,
    },
    AssignmentReceived(Uuid),
    StoreCreated(Uuid),
    CustomerCreated(Uuid),
    CartItemAdded {
        customer_id: Uuid,
        product_id: Uuid,
    },
    OrderCreated(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: String,
        new_status: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Sends an event, logging instead of failing when the consumer is gone.
    /// Event delivery must never fail a committed operation.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("event dropped: {e}");
        }
    }
}

/// Background consumer; logs every event it sees.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::InventoryUploaded {
                upload_id,
                total_amount,
            } => {
                info!(%upload_id, %total_amount, "event: inventory uploaded");
            }
            Event::StockAssigned {
                store_id,
                assignment_id,
                total_amount,
            } => {
                info!(%store_id, %assignment_id, %total_amount, "event: stock assigned");
            }
            Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status,
            } => {
                info!(%order_id, %old_status, %new_status, "event: order status changed");
            }
            other => info!(event = ?other, "event"),
        }
    }
    info!("event channel closed; consumer exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_consumer() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);
        sender.send(Event::OrderCreated(Uuid::new_v4())).await.unwrap();
        assert!(matches!(rx.recv().await, Some(Event::OrderCreated(_))));
    }

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        // Must not panic or error out.
        sender.send_or_log(Event::ProductCreated(Uuid::new_v4())).await;
    }
}
