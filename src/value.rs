use std::fmt;

use rust_decimal::Decimal;

/// A constant carried by a literal token or a `Literal` node.
///
/// Numbers keep the distinction the source made: digits without a fractional
/// part become [`Value::Integer`], digits with one become [`Value::Decimal`].
/// Decimals keep their scale, so `1.0` and `1.10` render back exactly as written.
///
/// # Examples
///
/// ```
/// use treexl::Value;
///
/// let null = Value::Null;
/// let flag = Value::Boolean(true);
/// let count = Value::Integer(42);
/// let ratio = Value::Decimal("1.50".parse().unwrap());
/// let name = Value::String("x".to_string());
///
/// assert_eq!(ratio.to_string(), "1.50");
/// assert_eq!(count.type_name(), "integer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Whole number literal
    Integer(i64),

    /// Number literal with a fractional part
    Decimal(Decimal),

    /// Single-quoted string literal, quotes removed
    String(String),
}

impl Value {
    /// Human-readable name of the value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
