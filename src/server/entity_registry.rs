//! Entity registry for collecting entity descriptors and their CRUD routes

use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for an entity
///
/// Each entity (Item, Order, PurchaseOrder, User) implements this trait
/// to provide its routes, relative to the API prefix.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "order")
    fn entity_type(&self) -> &str;

    /// The plural form used as the URL segment (e.g., "purchaseOrders")
    fn plural(&self) -> &str;

    /// Build the routes for this entity
    ///
    /// Typically:
    /// - GET/POST /{plural}
    /// - GET/PUT/DELETE /{plural}/{id}
    fn build_routes(&self) -> Router;
}

/// Registry for all entities served by the API
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity descriptor
    ///
    /// The entity type name is used as the key; registering the same type
    /// twice replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        tracing::debug!(
            entity_type = %entity_type,
            plural = descriptor.plural(),
            "entity registered"
        );
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge all registered entity routes into a single router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// URL segments of all registered entities, in entity type order
    pub fn plurals(&self) -> Vec<&str> {
        self.descriptors.values().map(|d| d.plural()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    struct MockDescriptor {
        entity_type: String,
        plural: String,
    }

    impl MockDescriptor {
        fn new(entity_type: &str, plural: &str) -> Self {
            Self {
                entity_type: entity_type.to_string(),
                plural: plural.to_string(),
            }
        }
    }

    impl EntityDescriptor for MockDescriptor {
        fn entity_type(&self) -> &str {
            &self.entity_type
        }

        fn plural(&self) -> &str {
            &self.plural
        }

        fn build_routes(&self) -> Router {
            Router::new().route(&format!("/{}", self.plural), get(|| async { "[]" }))
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = EntityRegistry::new();
        assert!(registry.plurals().is_empty());
    }

    #[test]
    fn test_register_keeps_name_order() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("user", "users")));
        registry.register(Box::new(MockDescriptor::new("item", "items")));
        registry.register(Box::new(MockDescriptor::new("purchaseOrder", "purchaseOrders")));

        assert_eq!(registry.plurals(), vec!["items", "purchaseOrders", "users"]);
    }

    #[test]
    fn test_register_same_type_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("order", "orders")));
        registry.register(Box::new(MockDescriptor::new("order", "sales")));

        assert_eq!(registry.plurals(), vec!["sales"]);
    }

    #[test]
    fn test_build_routes_merges_without_conflict() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("item", "items")));
        registry.register(Box::new(MockDescriptor::new("order", "orders")));

        let _router: Router = registry.build_routes();
    }
}
