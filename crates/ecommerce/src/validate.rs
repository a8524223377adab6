//! Per-field type check, validation and coercion.

use branch_schema::{FieldDescriptor, FieldType, Validation};
use serde_json::Value;

use crate::value::{parse_int, stringify};

/// Upper bound of a representable timestamp, in milliseconds (±100M days).
const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// Resolve the value forwarded for one field, or `None` when it is dropped.
///
/// Values whose type is accepted pass through their validation rule
/// unchanged. Other values are coerced: to a string when strings are
/// accepted, otherwise to an integer when numbers are accepted and the value
/// parses as one.
pub fn validated_value(value: &Value, descriptor: &FieldDescriptor) -> Option<Value> {
    let type_matches = FieldType::of(value).is_some_and(|t| descriptor.accepts(t));

    if type_matches {
        let passes = match descriptor.validation {
            None => true,
            Some(Validation::OneOf(allowed)) => {
                value.as_str().is_some_and(|s| allowed.contains(&s))
            }
            Some(Validation::Date) => is_valid_timestamp(value),
            Some(Validation::Positive) => value.as_f64().is_some_and(|n| n >= 0.0),
        };
        return passes.then(|| value.clone());
    }

    if descriptor.accepts(FieldType::String) {
        return Some(Value::String(stringify(value)));
    }
    if descriptor.accepts(FieldType::Number) {
        return parse_int(&stringify(value)).map(Value::Number);
    }
    None
}

fn is_valid_timestamp(value: &Value) -> bool {
    parse_int(&stringify(value))
        .and_then(|n| n.as_f64())
        .is_some_and(|ms| (0.0..=MAX_TIMESTAMP_MS).contains(&ms))
}
