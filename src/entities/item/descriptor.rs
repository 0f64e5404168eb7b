//! Entity descriptor for Item

use super::handlers::{ItemAppState, create_item, delete_item, get_item, list_items, update_item};
use super::model::Item;
use super::store::ItemRepository;
use crate::core::entity::Record;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the Item entity
pub struct ItemDescriptor {
    pub repository: ItemRepository,
}

impl ItemDescriptor {
    pub fn new(repository: ItemRepository) -> Self {
        Self { repository }
    }
}

impl EntityDescriptor for ItemDescriptor {
    fn entity_type(&self) -> &str {
        "item"
    }

    fn plural(&self) -> &str {
        Item::resource_name()
    }

    fn build_routes(&self) -> Router {
        let state = ItemAppState {
            repository: self.repository.clone(),
        };
        let collection = format!("/{}", self.plural());
        let record = format!("{collection}/{{id}}");

        Router::new()
            .route(&collection, get(list_items).post(create_item))
            .route(&record, get(get_item).put(update_item).delete(delete_item))
            .with_state(state)
    }
}
