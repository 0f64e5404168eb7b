//! Validation of incoming payloads
//!
//! Entities declare an ordered list of [`Rule`]s. Rules are checked in
//! order and the first one that fails decides the error message.

pub mod validators;

use crate::core::error::ValidationError;
use serde_json::Value;

/// Signature shared by every validator in [`validators`]
pub type Check = fn(Option<&Value>) -> bool;

/// One field rule: which field, how to check it, what to say when it fails
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn new(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
        }
    }

    /// Check this rule against a payload object
    pub fn apply(&self, payload: &Value) -> Result<(), ValidationError> {
        if (self.check)(payload.get(self.field)) {
            Ok(())
        } else {
            Err(ValidationError::new(self.field, self.message))
        }
    }
}

/// Check all rules in order, failing on the first violation
pub fn check_rules(payload: &Value, rules: &[Rule]) -> Result<(), ValidationError> {
    rules.iter().try_for_each(|rule| rule.apply(payload))
}
