//! Per-resource clients

use super::{ClientError, PetalClient};
use crate::core::entity::RecordId;
use crate::entities::item::{Item, ItemPatch, NewItem};
use crate::entities::order::{NewOrder, Order, OrderDeleted};
use crate::entities::purchase_order::{NewPurchaseOrder, PurchaseOrder, PurchaseOrderDeleted};
use crate::entities::user::{User, UserPayload};

/// `/api/items`
pub struct ItemsClient<'a> {
    client: &'a PetalClient,
}

impl<'a> ItemsClient<'a> {
    pub(super) fn new(client: &'a PetalClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Item>, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url("items"))).await
    }

    pub async fn get(&self, id: RecordId) -> Result<Item, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url(&format!("items/{id}")))).await
    }

    pub async fn create(&self, item: &NewItem) -> Result<Item, ClientError> {
        let c = self.client;
        c.send(c.http.post(c.url("items")).json(item)).await
    }

    pub async fn update(&self, id: RecordId, patch: &ItemPatch) -> Result<Item, ClientError> {
        let c = self.client;
        c.send(c.http.put(c.url(&format!("items/{id}"))).json(patch))
            .await
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), ClientError> {
        let c = self.client;
        c.send_empty(c.http.delete(c.url(&format!("items/{id}"))))
            .await
    }
}

/// `/api/orders`
pub struct OrdersClient<'a> {
    client: &'a PetalClient,
}

impl<'a> OrdersClient<'a> {
    pub(super) fn new(client: &'a PetalClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Order>, ClientError> {
        self.list_where(&[]).await
    }

    /// List with raw query parameters, e.g. `[("orderStatus", "Draft")]`
    /// or `[("filter", r#"{"createdAt>=":"2024-05-01"}"#), ("sort", "createdAt:desc")]`
    pub async fn list_where(&self, params: &[(&str, &str)]) -> Result<Vec<Order>, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url("orders")).query(params)).await
    }

    pub async fn get(&self, id: RecordId) -> Result<Order, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url(&format!("orders/{id}")))).await
    }

    pub async fn create(&self, order: &NewOrder) -> Result<Order, ClientError> {
        let c = self.client;
        c.send(c.http.post(c.url("orders")).json(order)).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<OrderDeleted, ClientError> {
        let c = self.client;
        c.send(c.http.delete(c.url(&format!("orders/{id}")))).await
    }
}

/// `/api/purchaseOrders`
pub struct PurchaseOrdersClient<'a> {
    client: &'a PetalClient,
}

impl<'a> PurchaseOrdersClient<'a> {
    pub(super) fn new(client: &'a PetalClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<PurchaseOrder>, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url("purchaseOrders"))).await
    }

    pub async fn get(&self, id: RecordId) -> Result<PurchaseOrder, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url(&format!("purchaseOrders/{id}"))))
            .await
    }

    pub async fn create(&self, po: &NewPurchaseOrder) -> Result<PurchaseOrder, ClientError> {
        let c = self.client;
        c.send(c.http.post(c.url("purchaseOrders")).json(po)).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<PurchaseOrderDeleted, ClientError> {
        let c = self.client;
        c.send(c.http.delete(c.url(&format!("purchaseOrders/{id}"))))
            .await
    }
}

/// `/api/users`
pub struct UsersClient<'a> {
    client: &'a PetalClient,
}

impl<'a> UsersClient<'a> {
    pub(super) fn new(client: &'a PetalClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url("users"))).await
    }

    pub async fn create(&self, user: &UserPayload) -> Result<User, ClientError> {
        let c = self.client;
        c.send(c.http.post(c.url("users")).json(user)).await
    }

    pub async fn update(&self, id: RecordId, user: &UserPayload) -> Result<User, ClientError> {
        let c = self.client;
        c.send(c.http.put(c.url(&format!("users/{id}"))).json(user))
            .await
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), ClientError> {
        let c = self.client;
        c.send_empty(c.http.delete(c.url(&format!("users/{id}"))))
            .await
    }
}
