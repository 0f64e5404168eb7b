//! Entity descriptor for PurchaseOrder

use super::handlers::{
    PurchaseOrderAppState, create_purchase_order, delete_purchase_order, get_purchase_order,
    list_purchase_orders,
};
use super::model::PurchaseOrder;
use super::store::PurchaseOrderRepository;
use crate::core::entity::Record;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the PurchaseOrder entity
pub struct PurchaseOrderDescriptor {
    pub repository: PurchaseOrderRepository,
}

impl PurchaseOrderDescriptor {
    pub fn new(repository: PurchaseOrderRepository) -> Self {
        Self { repository }
    }
}

impl EntityDescriptor for PurchaseOrderDescriptor {
    fn entity_type(&self) -> &str {
        "purchaseOrder"
    }

    fn plural(&self) -> &str {
        PurchaseOrder::resource_name()
    }

    fn build_routes(&self) -> Router {
        let state = PurchaseOrderAppState {
            repository: self.repository.clone(),
        };
        let collection = format!("/{}", self.plural());
        let record = format!("{collection}/{{id}}");

        Router::new()
            .route(
                &collection,
                get(list_purchase_orders).post(create_purchase_order),
            )
            .route(
                &record,
                get(get_purchase_order).delete(delete_purchase_order),
            )
            .with_state(state)
    }
}
