//! Order entity model

use crate::core::entity::{Record, RecordId};
use crate::core::error::ValidationError;
use crate::core::field::{iso_millis, timestamp_now};
use crate::core::validation::{Rule, check_rules, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const REQUIRED_MESSAGE: &str = "orderStart, orderEnd, and orderStatus are required";

/// `orderEnd` is named in the message but never enforced
pub const ORDER_RULES: &[Rule] = &[
    Rule::new("orderStart", validators::truthy, REQUIRED_MESSAGE),
    Rule::new("orderStatus", validators::truthy, REQUIRED_MESSAGE),
];

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    #[serde(default)]
    pub order_start: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_end: Option<Value>,
    #[serde(default)]
    pub order_status: Value,
    #[serde(default)]
    pub selected_flowers: Vec<Value>,
    #[serde(default)]
    pub action_history: Vec<Value>,
    #[serde(default)]
    pub discounts: Vec<Value>,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Record for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn label() -> &'static str {
        "Order"
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Validated order fields, not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub order_start: Value,
    pub order_end: Option<Value>,
    pub order_status: Value,
    pub selected_flowers: Vec<Value>,
    pub action_history: Vec<Value>,
    pub discounts: Vec<Value>,
}

impl OrderDraft {
    /// Validate a create payload
    ///
    /// Sequences that are not arrays are replaced by `[]`; a `null`
    /// `orderEnd` is treated as absent.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        check_rules(payload, ORDER_RULES)?;

        let field = |name: &str| payload.get(name).cloned().unwrap_or_default();
        let list = |name: &str| {
            payload
                .get(name)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Ok(Self {
            order_start: field("orderStart"),
            order_end: payload.get("orderEnd").filter(|v| !v.is_null()).cloned(),
            order_status: field("orderStatus"),
            selected_flowers: list("selectedFlowers"),
            action_history: list("actionHistory"),
            discounts: list("discounts"),
        })
    }

    /// Stamp id and creation time
    pub fn into_order(self, id: RecordId) -> Order {
        Order {
            id,
            order_start: self.order_start,
            order_end: self.order_end,
            order_status: self.order_status,
            selected_flowers: self.selected_flowers,
            action_history: self.action_history,
            discounts: self.discounts,
            created_at: timestamp_now(),
        }
    }
}

/// Body of `POST /api/orders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub order_start: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_end: Option<Value>,
    pub order_status: Value,
    #[serde(default)]
    pub selected_flowers: Vec<Value>,
    #[serde(default)]
    pub action_history: Vec<Value>,
    #[serde(default)]
    pub discounts: Vec<Value>,
}

/// Response of `DELETE /api/orders/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDeleted {
    pub message: String,
    pub deleted_order: Order,
}

impl OrderDeleted {
    pub fn new(deleted_order: Order) -> Self {
        Self {
            message: "Order deleted".to_string(),
            deleted_order,
        }
    }
}
