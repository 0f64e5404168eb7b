//! Entities module - items, orders, purchase orders and users
//!
//! Each entity follows the same layout: `model` (record, validation and
//! request/response bodies), `store` (repository over its list in the
//! document), `handlers` (axum handlers) and `descriptor` (route wiring).

pub mod item;
pub mod order;
pub mod purchase_order;
pub mod user;

use crate::server::entity_registry::EntityRegistry;
use crate::storage::JsonStore;
use std::sync::Arc;

// Re-export models for convenience
pub use item::Item;
pub use order::Order;
pub use purchase_order::{PurchaseOrder, PurchaseOrderLine};
pub use user::User;

/// Register every entity's routes, all backed by the same store
pub fn register_entities(registry: &mut EntityRegistry, store: Arc<JsonStore>) {
    registry.register(Box::new(item::ItemDescriptor::new(
        item::ItemRepository::new(store.clone()),
    )));
    registry.register(Box::new(order::OrderDescriptor::new(
        order::OrderRepository::new(store.clone()),
    )));
    registry.register(Box::new(purchase_order::PurchaseOrderDescriptor::new(
        purchase_order::PurchaseOrderRepository::new(store.clone()),
    )));
    registry.register(Box::new(user::UserDescriptor::new(
        user::UserRepository::new(store),
    )));
}
