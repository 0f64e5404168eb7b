//! Query parameters for filtering and sorting record lists

use crate::core::error::RequestError;
use crate::core::field::as_text;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Filtering and sorting parsed from a URL query string
///
/// # Format
/// - `filter`: JSON object. A bare key is an exact match on the JSON value;
///   keys suffixed with `>`, `<`, `>=`, `<=` compare numbers numerically and
///   strings lexicographically (ISO timestamps therefore chronologically).
/// - `sort`: `field`, `field:asc` or `field:desc`.
/// - anything else: `key=value` exact match on the field's text form.
///
/// # Example
/// ```text
/// GET /api/orders?orderStatus=Draft
/// GET /api/orders?filter={"createdAt>=":"2024-05-01"}&sort=createdAt:desc
/// ```
///
/// Applying a query never mutates the records it is given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    conditions: Vec<Condition>,
    sort: Option<SortSpec>,
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Equals { field: String, value: Value },
    TextEquals { field: String, text: String },
    Compare { field: String, op: CompareOp, value: Value },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CompareOp {
    Gt,
    Lt,
    Gte,
    Lte,
}

/// Sort field and direction
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    /// Parse `field`, `field:asc` or `field:desc`
    pub fn parse(raw: &str) -> Self {
        match raw.rsplit_once(':') {
            Some((field, "desc")) => Self {
                field: field.to_string(),
                descending: true,
            },
            Some((field, "asc")) => Self {
                field: field.to_string(),
                descending: false,
            },
            _ => Self {
                field: raw.to_string(),
                descending: false,
            },
        }
    }
}

impl ListQuery {
    /// Build a query from raw URL parameters
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, RequestError> {
        let mut query = Self::default();

        // Stable order so the same URL always builds the same query
        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();

        for key in keys {
            let raw = &params[key];
            match key.as_str() {
                "filter" => {
                    let filter: Value =
                        serde_json::from_str(raw).map_err(|e| RequestError::InvalidFilter {
                            message: e.to_string(),
                        })?;
                    let Value::Object(filter) = filter else {
                        return Err(RequestError::InvalidFilter {
                            message: "expected a JSON object".to_string(),
                        });
                    };
                    query.add_filter(filter);
                }
                "sort" => query.sort = Some(SortSpec::parse(raw)),
                field => query.conditions.push(Condition::TextEquals {
                    field: field.to_string(),
                    text: raw.clone(),
                }),
            }
        }

        Ok(query)
    }

    fn add_filter(&mut self, filter: Map<String, Value>) {
        for (key, value) in filter {
            let condition = if let Some(field) = key.strip_suffix(">=") {
                Condition::Compare {
                    field: field.to_string(),
                    op: CompareOp::Gte,
                    value,
                }
            } else if let Some(field) = key.strip_suffix("<=") {
                Condition::Compare {
                    field: field.to_string(),
                    op: CompareOp::Lte,
                    value,
                }
            } else if let Some(field) = key.strip_suffix('>') {
                Condition::Compare {
                    field: field.to_string(),
                    op: CompareOp::Gt,
                    value,
                }
            } else if let Some(field) = key.strip_suffix('<') {
                Condition::Compare {
                    field: field.to_string(),
                    op: CompareOp::Lt,
                    value,
                }
            } else {
                Condition::Equals { field: key, value }
            };
            self.conditions.push(condition);
        }
    }

    /// Whether this query filters or sorts anything
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.sort.is_none()
    }

    /// Apply filters then sorting to a collection of records
    pub fn apply<T: Serialize>(&self, records: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return records;
        }

        let mut rows: Vec<(Value, T)> = records
            .into_iter()
            .map(|record| (serde_json::to_value(&record).unwrap_or(Value::Null), record))
            .filter(|(row, _)| self.conditions.iter().all(|c| c.matches(row)))
            .collect();

        if let Some(sort) = &self.sort {
            rows.sort_by(|(a, _), (b, _)| {
                let ordering = total_cmp(a.get(&sort.field), b.get(&sort.field));
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        rows.into_iter().map(|(_, record)| record).collect()
    }
}

impl Condition {
    fn matches(&self, row: &Value) -> bool {
        match self {
            Condition::Equals { field, value } => row.get(field) == Some(value)
                || (value.is_null() && row.get(field).is_none()),
            Condition::TextEquals { field, text } => {
                row.get(field).is_some_and(|v| as_text(v) == *text)
            }
            Condition::Compare { field, op, value } => {
                let Some(ordering) = row.get(field).and_then(|v| partial_cmp(v, value)) else {
                    return false;
                };
                match op {
                    CompareOp::Gt => ordering == Ordering::Greater,
                    CompareOp::Lt => ordering == Ordering::Less,
                    CompareOp::Gte => ordering != Ordering::Less,
                    CompareOp::Lte => ordering != Ordering::Greater,
                }
            }
        }
    }
}

/// Compare two values of the same kind; `None` when kinds differ
fn partial_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Total order used for sorting: missing < bool < number < string < other
fn total_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or(0.0)
            .total_cmp(&y.as_f64().unwrap_or(0.0)),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({
                "id": 1,
                "orderStatus": "Draft",
                "total": 30,
                "createdAt": "2024-05-02T10:00:00.000Z"
            }),
            json!({
                "id": 2,
                "orderStatus": "Completed",
                "total": 10,
                "createdAt": "2024-05-01T10:00:00.000Z"
            }),
            json!({
                "id": 3,
                "orderStatus": "Draft",
                "total": 20,
                "createdAt": "2024-05-03T10:00:00.000Z"
            }),
        ]
    }

    fn ids(rows: &[Value]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_empty_query_returns_input() {
        let query = ListQuery::from_params(&HashMap::new()).unwrap();
        assert!(query.is_empty());
        assert_eq!(ids(&query.apply(rows())), vec![1, 2, 3]);
    }

    #[test]
    fn test_plain_param_is_text_match() {
        let query = ListQuery::from_params(&params(&[("orderStatus", "Draft")])).unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![1, 3]);

        let query = ListQuery::from_params(&params(&[("id", "2")])).unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![2]);
    }

    #[test]
    fn test_filter_exact_match() {
        let query =
            ListQuery::from_params(&params(&[("filter", r#"{"orderStatus":"Completed"}"#)]))
                .unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![2]);
    }

    #[test]
    fn test_filter_comparisons() {
        let query = ListQuery::from_params(&params(&[("filter", r#"{"total>":10}"#)])).unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![1, 3]);

        let query = ListQuery::from_params(&params(&[("filter", r#"{"total<=":20}"#)])).unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![2, 3]);

        let query = ListQuery::from_params(&params(&[(
            "filter",
            r#"{"createdAt>=":"2024-05-02T00:00:00.000Z"}"#,
        )]))
        .unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![1, 3]);
    }

    #[test]
    fn test_comparison_against_other_kind_excludes() {
        let query = ListQuery::from_params(&params(&[("filter", r#"{"total>":"5"}"#)])).unwrap();
        assert!(query.apply(rows()).is_empty());
    }

    #[test]
    fn test_sort() {
        let query = ListQuery::from_params(&params(&[("sort", "total")])).unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![2, 3, 1]);

        let query = ListQuery::from_params(&params(&[("sort", "createdAt:desc")])).unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_with_missing_field_puts_it_first() {
        let mut data = rows();
        data.push(json!({"id": 4, "orderStatus": "Draft"}));
        let query = ListQuery::from_params(&params(&[("sort", "total:asc")])).unwrap();
        assert_eq!(ids(&query.apply(data)), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_filter_and_sort_combined() {
        let query = ListQuery::from_params(&params(&[
            ("orderStatus", "Draft"),
            ("sort", "total:desc"),
        ]))
        .unwrap();
        assert_eq!(ids(&query.apply(rows())), vec![1, 3]);
    }

    #[test]
    fn test_invalid_filter() {
        let err = ListQuery::from_params(&params(&[("filter", "{not json")])).unwrap_err();
        assert!(matches!(err, RequestError::InvalidFilter { .. }));

        let err = ListQuery::from_params(&params(&[("filter", "[1,2]")])).unwrap_err();
        assert!(matches!(err, RequestError::InvalidFilter { .. }));
    }

    #[test]
    fn test_sort_spec_parse() {
        assert_eq!(
            SortSpec::parse("createdAt:desc"),
            SortSpec {
                field: "createdAt".to_string(),
                descending: true
            }
        );
        assert_eq!(
            SortSpec::parse("name"),
            SortSpec {
                field: "name".to_string(),
                descending: false
            }
        );
    }
}
