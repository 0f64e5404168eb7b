//! Reusable field validators
//!
//! Each validator receives the field as found in the payload: `None` when
//! the key is absent, `Some(Value::Null)` when it was sent as `null`.

use crate::core::field::{as_count, is_truthy};
use serde_json::Value;

/// Validator: value is present and truthy
pub fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Validator: value is a string with at least one non-whitespace character
pub fn non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// Validator: value is a whole number greater than or equal to zero
pub fn non_negative_integer(value: Option<&Value>) -> bool {
    value.and_then(as_count).is_some()
}

/// Validator: value is a number greater than or equal to zero
pub fn non_negative_number(value: Option<&Value>) -> bool {
    value.and_then(Value::as_f64).is_some_and(|n| n >= 0.0)
}

/// Validator: value is absent, or an array whose elements are all strings
///
/// An explicit `null` is rejected.
pub fn string_array_or_absent(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Array(values)) => values.iter().all(Value::is_string),
        Some(_) => false,
    }
}

/// Validator: value is absent, `null` or a number
pub fn optional_number(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::Number(_)))
}

/// Validator: value is absent, `null` or a string
pub fn optional_string(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::String(_)))
}

/// Validator: value is an array with at least one element
pub fn non_empty_array(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|values| !values.is_empty())
}

/// Validator: value is a number
pub fn number(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn some(value: Value) -> Option<Value> {
        Some(value)
    }

    // === truthy() ===

    #[test]
    fn test_truthy_absent_is_invalid() {
        assert!(!truthy(None));
    }

    #[test]
    fn test_truthy_falsy_values_are_invalid() {
        assert!(!truthy(some(json!(null)).as_ref()));
        assert!(!truthy(some(json!("")).as_ref()));
        assert!(!truthy(some(json!(0)).as_ref()));
    }

    #[test]
    fn test_truthy_values() {
        assert!(truthy(some(json!("2024-05-01")).as_ref()));
        assert!(truthy(some(json!({"date": "2024-05-01"})).as_ref()));
    }

    // === non_empty_string() ===

    #[test]
    fn test_non_empty_string_blank_is_invalid() {
        assert!(!non_empty_string(some(json!("   ")).as_ref()));
        assert!(!non_empty_string(some(json!("")).as_ref()));
    }

    #[test]
    fn test_non_empty_string_wrong_type_is_invalid() {
        assert!(!non_empty_string(some(json!(42)).as_ref()));
        assert!(!non_empty_string(None));
    }

    #[test]
    fn test_non_empty_string_ok() {
        assert!(non_empty_string(some(json!(" Rose ")).as_ref()));
    }

    // === non_negative_integer() ===

    #[test]
    fn test_non_negative_integer() {
        assert!(non_negative_integer(some(json!(0)).as_ref()));
        assert!(non_negative_integer(some(json!(10)).as_ref()));
        assert!(non_negative_integer(some(json!(10.0)).as_ref()));
        assert!(!non_negative_integer(some(json!(-1)).as_ref()));
        assert!(!non_negative_integer(some(json!(2.5)).as_ref()));
        assert!(!non_negative_integer(some(json!("10")).as_ref()));
        assert!(!non_negative_integer(None));
    }

    // === non_negative_number() ===

    #[test]
    fn test_non_negative_number() {
        assert!(non_negative_number(some(json!(0)).as_ref()));
        assert!(non_negative_number(some(json!(2.5)).as_ref()));
        assert!(!non_negative_number(some(json!(-0.01)).as_ref()));
        assert!(!non_negative_number(some(json!("2.5")).as_ref()));
        assert!(!non_negative_number(some(json!(null)).as_ref()));
    }

    // === string_array_or_absent() ===

    #[test]
    fn test_string_array_or_absent() {
        assert!(string_array_or_absent(None));
        assert!(string_array_or_absent(some(json!([])).as_ref()));
        assert!(string_array_or_absent(some(json!(["red", "long-stem"])).as_ref()));
        assert!(!string_array_or_absent(some(json!(["red", 1])).as_ref()));
        assert!(!string_array_or_absent(some(json!("red")).as_ref()));
        assert!(!string_array_or_absent(some(json!(null)).as_ref()));
    }

    // === optional_number() / optional_string() ===

    #[test]
    fn test_optional_number() {
        assert!(optional_number(None));
        assert!(optional_number(some(json!(null)).as_ref()));
        assert!(optional_number(some(json!(1.25)).as_ref()));
        assert!(!optional_number(some(json!("1.25")).as_ref()));
    }

    #[test]
    fn test_optional_string() {
        assert!(optional_string(None));
        assert!(optional_string(some(json!(null)).as_ref()));
        assert!(optional_string(some(json!("fresh")).as_ref()));
        assert!(!optional_string(some(json!(5)).as_ref()));
    }

    // === non_empty_array() / number() ===

    #[test]
    fn test_non_empty_array() {
        assert!(non_empty_array(some(json!([1])).as_ref()));
        assert!(!non_empty_array(some(json!([])).as_ref()));
        assert!(!non_empty_array(some(json!({"0": 1})).as_ref()));
        assert!(!non_empty_array(None));
    }

    #[test]
    fn test_number() {
        assert!(number(some(json!(3)).as_ref()));
        assert!(number(some(json!(-4.5)).as_ref()));
        assert!(!number(some(json!("3")).as_ref()));
        assert!(!number(None));
    }
}
