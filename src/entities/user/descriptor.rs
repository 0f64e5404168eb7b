//! Entity descriptor for User

use super::handlers::{UserAppState, create_user, delete_user, list_users, update_user};
use super::model::User;
use super::store::UserRepository;
use crate::core::entity::Record;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, put},
};

/// Descriptor for the User entity
pub struct UserDescriptor {
    pub repository: UserRepository,
}

impl UserDescriptor {
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }
}

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        User::resource_name()
    }

    fn build_routes(&self) -> Router {
        let state = UserAppState {
            repository: self.repository.clone(),
        };
        let collection = format!("/{}", self.plural());
        let record = format!("{collection}/{{id}}");

        Router::new()
            .route(&collection, get(list_users).post(create_user))
            .route(&record, put(update_user).delete(delete_user))
            .with_state(state)
    }
}
