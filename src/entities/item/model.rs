//! Item entity model with validation

use crate::core::entity::{Record, RecordId};
use crate::core::error::ValidationError;
use crate::core::field::{as_count, compact_f64, compact_opt_f64, explicit_null, lenient};
use crate::core::validation::{Rule, check_rules, validators};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Rules checked on create and on the merged record of an update
pub const ITEM_RULES: &[Rule] = &[
    Rule::new(
        "name",
        validators::non_empty_string,
        "Name is required and must be a non-empty string.",
    ),
    Rule::new(
        "stock",
        validators::non_negative_integer,
        "Stock is required and must be a non-negative integer.",
    ),
    Rule::new(
        "price",
        validators::non_negative_number,
        "Price is required and must be a non-negative number.",
    ),
    Rule::new(
        "category",
        validators::non_empty_string,
        "Category is required and must be a non-empty string.",
    ),
    Rule::new(
        "tags",
        validators::string_array_or_absent,
        "Tags must be an array of strings.",
    ),
    Rule::new("cost", validators::optional_number, "Cost must be a number."),
    Rule::new(
        "description",
        validators::optional_string,
        "Description must be a string.",
    ),
];

/// Fields a partial update may overwrite
pub const UPDATABLE_FIELDS: &[&str] = &[
    "name",
    "stock",
    "price",
    "cost",
    "category",
    "description",
    "tags",
];

/// A stock item
///
/// Stored fields are read leniently: documents written before updates were
/// validated may hold a negative stock, a numeric string or a `null` price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: i64,
    #[serde(
        default,
        serialize_with = "compact_f64",
        deserialize_with = "lenient::number"
    )]
    pub price: f64,
    #[serde(
        default,
        serialize_with = "compact_opt_f64",
        deserialize_with = "lenient::optional_number"
    )]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub tags: IndexSet<String>,
}

impl Record for Item {
    fn resource_name() -> &'static str {
        "items"
    }

    fn label() -> &'static str {
        "Item"
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Item {
    /// Key used for the case-insensitive name uniqueness check
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// The record as an update payload, with `patch` fields laid over it
    ///
    /// Only [`UPDATABLE_FIELDS`] are taken from `patch`; an explicit `null`
    /// counts as a value, an absent key does not.
    pub fn merged_with(&self, patch: &Value) -> Value {
        let mut fields: Map<String, Value> = match json!({
            "name": self.name,
            "stock": self.stock,
            "price": self.price,
            "cost": self.cost,
            "category": self.category,
            "description": self.description,
            "tags": self.tags,
        }) {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        for field in UPDATABLE_FIELDS {
            if let Some(value) = patch.get(*field) {
                fields.insert(field.to_string(), value.clone());
            }
        }

        Value::Object(fields)
    }
}

/// Validated, normalized item fields, not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub stock: i64,
    pub price: f64,
    pub cost: Option<f64>,
    pub category: String,
    pub description: String,
    pub tags: IndexSet<String>,
}

impl ItemDraft {
    /// Validate a payload against [`ITEM_RULES`] and normalize it
    ///
    /// Name and description are trimmed, cost defaults to `None`,
    /// description to `""` and tags to empty (duplicates dropped).
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        check_rules(payload, ITEM_RULES)?;

        let text = |field: &str| payload.get(field).and_then(Value::as_str).unwrap_or_default();

        Ok(Self {
            name: text("name").trim().to_string(),
            stock: payload.get("stock").and_then(as_count).unwrap_or_default(),
            price: payload
                .get("price")
                .and_then(Value::as_f64)
                .unwrap_or_default(),
            cost: payload.get("cost").and_then(Value::as_f64),
            category: text("category").to_string(),
            description: text("description").trim().to_string(),
            tags: payload
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn into_item(self, id: RecordId) -> Item {
        Item {
            id,
            name: self.name,
            stock: self.stock,
            price: self.price,
            cost: self.cost,
            category: self.category,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Body of `POST /api/items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub stock: u64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body of `PUT /api/items/{id}`; absent fields are left unchanged
///
/// `cost: Some(None)` sends an explicit `null`, clearing the cost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "explicit_null"
    )]
    pub cost: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
