//! Order repository

use super::model::{Order, OrderDraft};
use crate::core::entity::{Record, RecordId};
use crate::core::error::{ApiResult, NotFoundError};
use crate::core::query::ListQuery;
use crate::core::service::Repository;
use crate::storage::JsonStore;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Repository for Order records
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<JsonStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// List orders matching `query`, sorted as requested
    pub async fn list_filtered(&self, query: &ListQuery) -> ApiResult<Vec<Order>> {
        let orders = self.list().await?;
        Ok(query.apply(orders))
    }

    pub async fn create(&self, payload: &Value) -> ApiResult<Order> {
        let draft = OrderDraft::from_payload(payload)?;

        let mut doc = self.store.lock().await;
        let order = draft.into_order(self.store.next_id());
        doc.orders.push(order.clone());
        doc.flush().await?;

        tracing::info!(id = order.id, "order created");
        Ok(order)
    }

    /// Remove an order and return it; unknown ids are NotFound
    pub async fn delete(&self, id: RecordId) -> ApiResult<Order> {
        let mut doc = self.store.lock().await;
        let index = doc
            .orders
            .iter()
            .position(|order| order.id == id)
            .ok_or_else(|| NotFoundError::new(Order::label(), id))?;

        let removed = doc.orders.remove(index);
        doc.flush().await?;

        tracing::info!(id, "order deleted");
        Ok(removed)
    }
}

#[async_trait]
impl Repository for OrderRepository {
    type Record = Order;

    async fn list(&self) -> ApiResult<Vec<Order>> {
        Ok(self.store.lock().await.orders.clone())
    }

    async fn find(&self, id: RecordId) -> ApiResult<Option<Order>> {
        let doc = self.store.lock().await;
        Ok(doc.orders.iter().find(|order| order.id == id).cloned())
    }
}
