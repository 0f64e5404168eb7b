//! Record trait shared by every entity stored in the document

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Identifier assigned to every record at insert time
pub type RecordId = i64;

/// Base trait for all records kept in the JSON document.
///
/// Every record has:
/// - id: Unique integer identifier (see [`IdGenerator`](crate::core::id::IdGenerator))
/// - a plural resource name used in URLs and as its document key
/// - a human-readable label used in error messages
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "items", "purchaseOrders")
    fn resource_name() -> &'static str;

    /// Human-readable label (e.g., "Item", "Purchase order")
    fn label() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> RecordId;
}
