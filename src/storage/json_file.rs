//! Single-file JSON document store
//!
//! The whole database is one JSON document kept in memory and written back
//! after every mutation. Writes go to a sibling `.tmp` file which is then
//! renamed over the target, so a crash mid-write never leaves a truncated
//! document behind.
//!
//! **Single-process only.** Two processes opening the same file will
//! overwrite each other's changes.

use crate::core::entity::{Record, RecordId};
use crate::core::error::StorageError;
use crate::core::id::IdGenerator;
use crate::entities::{Item, Order, PurchaseOrder, User};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

/// The persisted document
///
/// Lists missing from the file load as empty. Top-level keys this crate
/// does not know about are kept and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Largest id used by any record, or 0 for an empty document
    pub fn max_id(&self) -> RecordId {
        let users = self.users.iter().map(Record::id);
        let items = self.items.iter().map(Record::id);
        let orders = self.orders.iter().map(Record::id);
        let purchase_orders = self.purchase_orders.iter().map(Record::id);

        users
            .chain(items)
            .chain(orders)
            .chain(purchase_orders)
            .max()
            .unwrap_or(0)
    }

    /// Pretty-printed JSON with two-space indent and a trailing newline
    pub fn to_pretty_json(&self) -> Result<String, StorageError> {
        let mut text = serde_json::to_string_pretty(self).map_err(StorageError::Encode)?;
        text.push('\n');
        Ok(text)
    }
}

/// In-memory mirror of the JSON document, shared by every repository
///
/// # Example
///
/// ```rust,ignore
/// let store = Arc::new(JsonStore::open("db.json").await?);
/// let mut doc = store.lock().await;
/// doc.users.push(user);
/// doc.flush().await?;
/// ```
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    document: Mutex<Document>,
    ids: IdGenerator,
}

impl JsonStore {
    /// Load the document at `path`, or start empty if the file does not exist
    ///
    /// Nothing is written until the first flush. A file that exists but
    /// cannot be read or parsed is an error.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let document = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str::<Document>(&text).map_err(|source| {
                StorageError::Parse {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no database file, starting empty");
                Document::default()
            }
            Err(source) => return Err(StorageError::Read { path, source }),
        };

        tracing::info!(
            path = %path.display(),
            users = document.users.len(),
            items = document.items.len(),
            orders = document.orders.len(),
            purchase_orders = document.purchase_orders.len(),
            "database loaded"
        );

        Ok(Self {
            ids: IdGenerator::seeded(document.max_id()),
            document: Mutex::new(document),
            path,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take exclusive access to the document until the guard is dropped
    pub async fn lock(&self) -> DocumentGuard<'_> {
        DocumentGuard {
            document: self.document.lock().await,
            path: &self.path,
        }
    }

    /// Next record id
    pub fn next_id(&self) -> RecordId {
        self.ids.next_id()
    }

    /// Final flush at shutdown
    pub async fn close(&self) -> Result<(), StorageError> {
        self.lock().await.flush().await?;
        tracing::info!(path = %self.path.display(), "database closed");
        Ok(())
    }
}

/// Exclusive handle on the document
///
/// Holding it blocks every other repository operation, so a mutation and
/// its flush are observed as one step.
pub struct DocumentGuard<'a> {
    document: MutexGuard<'a, Document>,
    path: &'a Path,
}

impl DocumentGuard<'_> {
    /// Write the document to disk
    ///
    /// A failure leaves the in-memory document as it is.
    pub async fn flush(&self) -> Result<(), StorageError> {
        let text = self.document.to_pretty_json()?;
        let write_error = |source| StorageError::Write {
            path: self.path.to_path_buf(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let temp_path = temp_path_for(self.path);
        tokio::fs::write(&temp_path, text).await.map_err(write_error)?;
        tokio::fs::rename(&temp_path, self.path)
            .await
            .map_err(write_error)?;

        tracing::debug!(path = %self.path.display(), "database flushed");
        Ok(())
    }
}

impl Deref for DocumentGuard<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}

impl DerefMut for DocumentGuard<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "db.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn user(id: RecordId, name: &str) -> User {
        User {
            id,
            name: json!(name),
        }
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let store = JsonStore::open(&path).await.unwrap();
        assert_eq!(*store.lock().await, Document::default());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_flush_then_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let store = JsonStore::open(&path).await.unwrap();
        {
            let mut doc = store.lock().await;
            doc.users.push(user(10, "Ada"));
            doc.flush().await.unwrap();
        }

        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(reopened.lock().await.users, vec![user(10, "Ada")]);
        assert!(reopened.next_id() > 10);
        assert!(!dir.path().join("db.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_lists_default_and_unknown_keys_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        tokio::fs::write(&path, r#"{"users":[{"id":1,"name":"Ada"}],"settings":{"theme":"dark"}}"#)
            .await
            .unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        {
            let doc = store.lock().await;
            assert!(doc.items.is_empty());
            assert!(doc.purchase_orders.is_empty());
            doc.flush().await.unwrap();
        }

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["settings"], json!({"theme": "dark"}));
        assert_eq!(written["purchaseOrders"], json!([]));
        assert_eq!(written["users"][0]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_pretty_output_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("db.json");

        let store = JsonStore::open(&path).await.unwrap();
        store.close().await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"users\": []"));
        assert!(text.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        match JsonStore::open(&path).await {
            Err(StorageError::Parse { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_flush_keeps_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::create_dir(dir.path().join("db.json.tmp")).unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        let mut doc = store.lock().await;
        doc.users.push(user(1, "Ada"));

        assert!(matches!(
            doc.flush().await,
            Err(StorageError::Write { .. })
        ));
        assert_eq!(doc.users.len(), 1);
    }

    #[test]
    fn test_max_id_spans_every_list() {
        let mut doc = Document::default();
        assert_eq!(doc.max_id(), 0);

        doc.users.push(user(5, "Ada"));
        doc.users.push(user(42, "Grace"));
        assert_eq!(doc.max_id(), 42);
    }

    #[test]
    fn test_temp_path_is_a_sibling() {
        assert_eq!(
            temp_path_for(Path::new("/data/db.json")),
            PathBuf::from("/data/db.json.tmp")
        );
    }
}
