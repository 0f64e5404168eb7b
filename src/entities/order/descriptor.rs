//! Entity descriptor for Order

use super::handlers::{OrderAppState, create_order, delete_order, get_order, list_orders};
use super::model::Order;
use super::store::OrderRepository;
use crate::core::entity::Record;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the Order entity
pub struct OrderDescriptor {
    pub repository: OrderRepository,
}

impl OrderDescriptor {
    pub fn new(repository: OrderRepository) -> Self {
        Self { repository }
    }
}

impl EntityDescriptor for OrderDescriptor {
    fn entity_type(&self) -> &str {
        "order"
    }

    fn plural(&self) -> &str {
        Order::resource_name()
    }

    fn build_routes(&self) -> Router {
        let state = OrderAppState {
            repository: self.repository.clone(),
        };
        let collection = format!("/{}", self.plural());
        let record = format!("{collection}/{{id}}");

        Router::new()
            .route(&collection, get(list_orders).post(create_order))
            .route(&record, get(get_order).delete(delete_order))
            .with_state(state)
    }
}
