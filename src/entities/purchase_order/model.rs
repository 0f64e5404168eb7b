//! Purchase order entity model
//!
//! Line subtotals and the order total are derived from `qty` and
//! `costPerUnit`; whatever the caller sends for them is discarded.
//! Stored numbers are read leniently, as older documents hold `null` where
//! a total came out as `NaN`.

use crate::core::entity::{Record, RecordId};
use crate::core::error::ValidationError;
use crate::core::field::{compact_f64, iso_millis, lenient, timestamp_now};
use crate::core::validation::{Rule, check_rules, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const REQUIRED_MESSAGE: &str = "Supplier and at least one item are required";

pub const PURCHASE_ORDER_RULES: &[Rule] = &[
    Rule::new("supplier", validators::truthy, REQUIRED_MESSAGE),
    Rule::new("items", validators::non_empty_array, REQUIRED_MESSAGE),
];

const LINE_MESSAGE: &str = "Each item requires a numeric qty and costPerUnit.";

const TOTAL_MESSAGE: &str = "Purchase order total is too large to represent.";

pub const LINE_RULES: &[Rule] = &[
    Rule::new("qty", validators::number, LINE_MESSAGE),
    Rule::new("costPerUnit", validators::number, LINE_MESSAGE),
];

/// One line of a purchase order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub name: Value,
    #[serde(default, serialize_with = "compact_f64", deserialize_with = "lenient::number")]
    pub qty: f64,
    #[serde(default, serialize_with = "compact_f64", deserialize_with = "lenient::number")]
    pub cost_per_unit: f64,
    #[serde(default, serialize_with = "compact_f64", deserialize_with = "lenient::number")]
    pub subtotal: f64,
}

impl PurchaseOrderLine {
    /// Validate one requested line and compute its subtotal
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        check_rules(payload, LINE_RULES)?;

        let qty = payload.get("qty").and_then(Value::as_f64).unwrap_or_default();
        let cost_per_unit = payload
            .get("costPerUnit")
            .and_then(Value::as_f64)
            .unwrap_or_default();

        Ok(Self {
            id: payload.get("id").cloned().unwrap_or_default(),
            name: payload.get("name").cloned().unwrap_or_default(),
            qty,
            cost_per_unit,
            subtotal: qty * cost_per_unit,
        })
    }
}

/// A stock replenishment order placed with a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: RecordId,
    #[serde(default)]
    pub supplier: Value,
    #[serde(default)]
    pub items: Vec<PurchaseOrderLine>,
    #[serde(default, serialize_with = "compact_f64", deserialize_with = "lenient::number")]
    pub total_cost: f64,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Record for PurchaseOrder {
    fn resource_name() -> &'static str {
        "purchaseOrders"
    }

    fn label() -> &'static str {
        "Purchase order"
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Validated purchase order, not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrderDraft {
    pub supplier: Value,
    pub items: Vec<PurchaseOrderLine>,
}

impl PurchaseOrderDraft {
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        check_rules(payload, PURCHASE_ORDER_RULES)?;

        let items = payload
            .get("items")
            .and_then(Value::as_array)
            .map(|lines| {
                lines
                    .iter()
                    .map(PurchaseOrderLine::from_payload)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        let draft = Self {
            supplier: payload.get("supplier").cloned().unwrap_or_default(),
            items,
        };

        // a non-finite line makes the sum non-finite too
        if !draft.total_cost().is_finite() {
            return Err(ValidationError::new("items", TOTAL_MESSAGE));
        }

        Ok(draft)
    }

    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|line| line.subtotal).sum()
    }

    pub fn into_purchase_order(self, id: RecordId) -> PurchaseOrder {
        PurchaseOrder {
            id,
            total_cost: self.total_cost(),
            supplier: self.supplier,
            items: self.items,
            created_at: timestamp_now(),
        }
    }
}

/// Line of a `POST /api/purchaseOrders` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchaseOrderLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub qty: f64,
    pub cost_per_unit: f64,
}

/// Body of `POST /api/purchaseOrders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    pub supplier: Value,
    pub items: Vec<NewPurchaseOrderLine>,
}

/// Response of `DELETE /api/purchaseOrders/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderDeleted {
    pub message: String,
    #[serde(rename = "deletedPO")]
    pub deleted_po: PurchaseOrder,
}

impl PurchaseOrderDeleted {
    pub fn new(deleted_po: PurchaseOrder) -> Self {
        Self {
            message: "Purchase order deleted".to_string(),
            deleted_po,
        }
    }
}
