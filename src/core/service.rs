//! Repository trait shared by every entity list

use crate::core::entity::{Record, RecordId};
use crate::core::error::{ApiResult, NotFoundError};
use async_trait::async_trait;

/// Read side common to every repository
///
/// Each repository owns one top-level list of the document. Mutating
/// operations differ per entity (validation, delete semantics) and are
/// defined on the concrete repositories.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The record type stored in this repository's list
    type Record: Record;

    /// List every record in insertion order
    async fn list(&self) -> ApiResult<Vec<Self::Record>>;

    /// Find a record by id
    async fn find(&self, id: RecordId) -> ApiResult<Option<Self::Record>>;

    /// Get a record by id, failing with NotFound when absent
    async fn get(&self, id: RecordId) -> ApiResult<Self::Record> {
        self.find(id)
            .await?
            .ok_or_else(|| NotFoundError::new(Self::Record::label(), id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Serialize, Deserialize)]
    struct Note {
        id: RecordId,
    }

    impl Record for Note {
        fn resource_name() -> &'static str {
            "notes"
        }

        fn label() -> &'static str {
            "Note"
        }

        fn id(&self) -> RecordId {
            self.id
        }
    }

    struct FixedRepository(Vec<Note>);

    #[async_trait]
    impl Repository for FixedRepository {
        type Record = Note;

        async fn list(&self) -> ApiResult<Vec<Note>> {
            Ok(self.0.clone())
        }

        async fn find(&self, id: RecordId) -> ApiResult<Option<Note>> {
            Ok(self.0.iter().find(|n| n.id == id).cloned())
        }
    }

    #[tokio::test]
    async fn test_get_existing() {
        let repo = FixedRepository(vec![Note { id: 1 }, Note { id: 2 }]);
        assert_eq!(repo.get(2).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = FixedRepository(vec![]);
        match repo.get(9).await {
            Err(ApiError::NotFound(e)) => {
                assert_eq!(e.id, 9);
                assert_eq!(e.to_string(), "Note not found");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
