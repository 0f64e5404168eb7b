//! Purchase order repository

use super::model::{PurchaseOrder, PurchaseOrderDraft};
use crate::core::entity::{Record, RecordId};
use crate::core::error::{ApiResult, NotFoundError};
use crate::core::service::Repository;
use crate::storage::JsonStore;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Repository for PurchaseOrder records
#[derive(Clone)]
pub struct PurchaseOrderRepository {
    store: Arc<JsonStore>,
}

impl PurchaseOrderRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Validate, price and insert a purchase order
    pub async fn create(&self, payload: &Value) -> ApiResult<PurchaseOrder> {
        let draft = PurchaseOrderDraft::from_payload(payload)?;

        let mut doc = self.store.lock().await;
        let po = draft.into_purchase_order(self.store.next_id());
        doc.purchase_orders.push(po.clone());
        doc.flush().await?;

        tracing::info!(
            id = po.id,
            lines = po.items.len(),
            total = po.total_cost,
            "purchase order created"
        );
        Ok(po)
    }

    /// Remove a purchase order and return it; unknown ids are NotFound
    pub async fn delete(&self, id: RecordId) -> ApiResult<PurchaseOrder> {
        let mut doc = self.store.lock().await;
        let index = doc
            .purchase_orders
            .iter()
            .position(|po| po.id == id)
            .ok_or_else(|| NotFoundError::new(PurchaseOrder::label(), id))?;

        let removed = doc.purchase_orders.remove(index);
        doc.flush().await?;

        tracing::info!(id, "purchase order deleted");
        Ok(removed)
    }
}

#[async_trait]
impl Repository for PurchaseOrderRepository {
    type Record = PurchaseOrder;

    async fn list(&self) -> ApiResult<Vec<PurchaseOrder>> {
        Ok(self.store.lock().await.purchase_orders.clone())
    }

    async fn find(&self, id: RecordId) -> ApiResult<Option<PurchaseOrder>> {
        let doc = self.store.lock().await;
        Ok(doc.purchase_orders.iter().find(|po| po.id == id).cloned())
    }
}
