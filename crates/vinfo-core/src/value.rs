//! # Dynamic Value Introspection
//!
//! Message parameters are `serde_json::Value`. The schema engine reasons
//! about the finer-grained variant set used on the wire, where a number is
//! a signed integer, an unsigned integer beyond the signed range, or a
//! double. [`ValueKind`] recovers that distinction.

use std::fmt;

use serde_json::Value;

/// Variant of a dynamic message value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    /// Number representable as `i64`.
    Integer,
    /// Number representable only as `u64`.
    UInteger,
    /// Floating-point number.
    Double,
    String,
    Array,
    Map,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() => Self::Integer,
            Value::Number(n) if n.is_u64() => Self::UInteger,
            Value::Number(_) => Self::Double,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Map,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::UInteger => "unsigned integer",
            Self::Double => "double",
            Self::String => "string",
            Self::Array => "array",
            Self::Map => "map",
        }
    }

    /// Returns `true` for `Integer` and `UInteger`.
    pub fn is_integral(&self) -> bool {
        matches!(self, Self::Integer | Self::UInteger)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_variants() {
        assert_eq!(ValueKind::of(&json!(-5)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(5)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(u64::MAX)), ValueKind::UInteger);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Double);
    }

    #[test]
    fn test_container_variants() {
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Map);
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
    }

    #[test]
    fn test_is_integral() {
        assert!(ValueKind::Integer.is_integral());
        assert!(ValueKind::UInteger.is_integral());
        assert!(!ValueKind::Double.is_integral());
    }
}
