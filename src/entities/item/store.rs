//! Item repository backed by the `items` list of the JSON document

use super::model::{Item, ItemDraft};
use crate::core::entity::{Record, RecordId};
use crate::core::error::{ApiResult, ConflictError, NotFoundError};
use crate::core::service::Repository;
use crate::storage::JsonStore;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Repository for Item records
#[derive(Clone)]
pub struct ItemRepository {
    store: Arc<JsonStore>,
}

impl ItemRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Validate and insert a new item
    ///
    /// Rules are checked in order (name, stock, price, category, tags, cost,
    /// description); name uniqueness is checked last and reported as a
    /// conflict rather than a validation failure.
    pub async fn create(&self, payload: &Value) -> ApiResult<Item> {
        let draft = ItemDraft::from_payload(payload)?;

        let mut doc = self.store.lock().await;
        let key = draft.name_key();
        if doc.items.iter().any(|item| item.name_key() == key) {
            return Err(ConflictError::DuplicateName {
                label: Item::label(),
                name: draft.name,
            }
            .into());
        }

        let item = draft.into_item(self.store.next_id());
        doc.items.push(item.clone());
        doc.flush().await?;

        tracing::info!(id = item.id, name = %item.name, "item created");
        Ok(item)
    }

    /// Overwrite the recognized fields present in `patch`
    ///
    /// The merged record goes through the same rules as a create, including
    /// name uniqueness against the other items. The stored record is only
    /// replaced once the merged one is valid.
    pub async fn update(&self, id: RecordId, patch: &Value) -> ApiResult<Item> {
        let mut doc = self.store.lock().await;
        let index = doc
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| NotFoundError::new(Item::label(), id))?;

        let draft = ItemDraft::from_payload(&doc.items[index].merged_with(patch))?;
        let key = draft.name_key();
        if doc
            .items
            .iter()
            .any(|item| item.id != id && item.name_key() == key)
        {
            return Err(ConflictError::DuplicateName {
                label: Item::label(),
                name: draft.name,
            }
            .into());
        }

        let item = draft.into_item(id);
        doc.items[index] = item.clone();
        doc.flush().await?;

        tracing::info!(id, "item updated");
        Ok(item)
    }

    /// Remove an item; deleting an unknown id succeeds
    pub async fn delete(&self, id: RecordId) -> ApiResult<()> {
        let mut doc = self.store.lock().await;
        let before = doc.items.len();
        doc.items.retain(|item| item.id != id);
        let removed = before - doc.items.len();
        doc.flush().await?;

        tracing::info!(id, removed, "item delete");
        Ok(())
    }
}

#[async_trait]
impl Repository for ItemRepository {
    type Record = Item;

    async fn list(&self) -> ApiResult<Vec<Item>> {
        Ok(self.store.lock().await.items.clone())
    }

    async fn find(&self, id: RecordId) -> ApiResult<Option<Item>> {
        let doc = self.store.lock().await;
        Ok(doc.items.iter().find(|item| item.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use serde_json::json;
    use tempfile::TempDir;

    async fn repository() -> (TempDir, ItemRepository) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonStore::open(dir.path().join("db.json"))
            .await
            .expect("Failed to open store");
        (dir, ItemRepository::new(Arc::new(store)))
    }

    fn rose() -> Value {
        json!({"name": "Rose", "stock": 10, "price": 2.5, "category": "Flower"})
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_dir, repo) = repository().await;
        let created = repo.create(&rose()).await.unwrap();

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Rose");
        assert_eq!(fetched.cost, None);
    }

    #[tokio::test]
    async fn test_duplicate_name_case_insensitive() {
        let (_dir, repo) = repository().await;
        repo.create(&rose()).await.unwrap();

        let mut payload = rose();
        payload["name"] = json!("  rOSE ");
        match repo.create(&payload).await {
            Err(ApiError::Conflict(e)) => {
                assert_eq!(e.to_string(), "Item with this name already exists.")
            }
            other => panic!("Expected Conflict, got {:?}", other),
        }
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_runs_before_uniqueness() {
        let (_dir, repo) = repository().await;
        repo.create(&rose()).await.unwrap();

        let mut payload = rose();
        payload["price"] = json!(-3);
        assert!(matches!(
            repo.create(&payload).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_update_leaves_record_unchanged() {
        let (_dir, repo) = repository().await;
        let created = repo.create(&rose()).await.unwrap();

        let updated = repo.update(created.id, &json!({})).await.unwrap();
        assert_eq!(updated, created);
        assert_eq!(repo.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let (_dir, repo) = repository().await;
        let created = repo.create(&rose()).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &json!({"stock": 3, "tags": ["red"], "unknown": true, "id": 5}),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.stock, 3);
        assert!(updated.tags.contains("red"));
        assert_eq!(updated.price, 2.5);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_merge() {
        let (_dir, repo) = repository().await;
        let created = repo.create(&rose()).await.unwrap();

        let err = repo
            .update(created.id, &json!({"stock": -5}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(repo.get(created.id).await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_update_rename_onto_other_item_conflicts() {
        let (_dir, repo) = repository().await;
        repo.create(&rose()).await.unwrap();
        let mut tulip = rose();
        tulip["name"] = json!("Tulip");
        let tulip = repo.create(&tulip).await.unwrap();

        let err = repo
            .update(tulip.id, &json!({"name": "ROSE"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        // Renaming to a different case of its own name is fine
        let renamed = repo.update(tulip.id, &json!({"name": "TULIP"})).await.unwrap();
        assert_eq!(renamed.name, "TULIP");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_dir, repo) = repository().await;
        let err = repo.update(404, &json!({"stock": 1})).await.unwrap_err();
        assert_eq!(err.to_string(), "Item not found");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, repo) = repository().await;
        let created = repo.create(&rose()).await.unwrap();

        repo.delete(created.id).await.unwrap();
        repo.delete(created.id).await.unwrap();
        repo.delete(123_456).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
