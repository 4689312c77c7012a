//! Literal values to JSON, for machine-readable CLI output

use rust_decimal::prelude::ToPrimitive;

use crate::Value;

/// Convert a literal value to `serde_json::Value`.
///
/// Decimals become JSON numbers when an `f64` represents them, and strings
/// otherwise, so no digits are silently lost.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Decimal(d) => d
            .to_f64()
            .filter(|f| f.to_string() == d.normalize().to_string())
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(d.to_string())),
        Value::String(s) => serde_json::Value::String(s.clone()),
    }
}

/// Convert collected parameter values to a JSON array, in binding order.
pub fn params_to_json(values: &[Value]) -> serde_json::Value {
    serde_json::Value::Array(values.iter().map(value_to_json).collect())
}
