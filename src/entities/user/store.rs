//! User repository

use super::model::{User, UserPayload};
use crate::core::entity::{Record, RecordId};
use crate::core::error::{ApiResult, NotFoundError};
use crate::core::service::Repository;
use crate::storage::JsonStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Repository for User records
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<JsonStore>,
}

impl UserRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: UserPayload) -> ApiResult<User> {
        let mut doc = self.store.lock().await;
        let user = User {
            id: self.store.next_id(),
            name: payload.name,
        };
        doc.users.push(user.clone());
        doc.flush().await?;

        tracing::info!(id = user.id, "user created");
        Ok(user)
    }

    /// Overwrite the user's name, even with `null`
    pub async fn update(&self, id: RecordId, payload: UserPayload) -> ApiResult<User> {
        let mut doc = self.store.lock().await;
        let user = doc
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| NotFoundError::new(User::label(), id))?;

        user.name = payload.name;
        let user = user.clone();
        doc.flush().await?;

        tracing::info!(id, "user updated");
        Ok(user)
    }

    /// Remove a user; deleting an unknown id succeeds
    pub async fn delete(&self, id: RecordId) -> ApiResult<()> {
        let mut doc = self.store.lock().await;
        doc.users.retain(|user| user.id != id);
        doc.flush().await?;

        tracing::info!(id, "user delete");
        Ok(())
    }
}

#[async_trait]
impl Repository for UserRepository {
    type Record = User;

    async fn list(&self) -> ApiResult<Vec<User>> {
        Ok(self.store.lock().await.users.clone())
    }

    async fn find(&self, id: RecordId) -> ApiResult<Option<User>> {
        let doc = self.store.lock().await;
        Ok(doc.users.iter().find(|user| user.id == id).cloned())
    }
}
