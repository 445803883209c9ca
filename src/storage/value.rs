//! Value type for RowStore
//!
//! This module defines the decoded form of a single field.

use std::borrow::Cow;
use std::fmt;

/// A decoded field value
#[derive(Debug, Clone)]
pub enum Value {
    /// Number read from a quantitative column
    Quantitative(f64),
    /// Raw byte blob read from a categorical column, padding included
    Categorical(Vec<u8>),
}

// Floats compare bitwise so that values can be hashed and deduplicated
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Quantitative(a), Value::Quantitative(b)) => a.to_bits() == b.to_bits(),
            (Value::Categorical(a), Value::Categorical(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Quantitative(v) => v.to_bits().hash(state),
            Value::Categorical(v) => v.hash(state),
        }
    }
}

impl Value {
    /// Build a categorical value from text
    pub fn text(s: impl AsRef<str>) -> Self {
        Value::Categorical(s.as_ref().as_bytes().to_vec())
    }

    /// Try to convert to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Quantitative(v) => Some(*v),
            Value::Categorical(_) => None,
        }
    }

    /// Raw bytes of a categorical value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Categorical(b) => Some(b),
            Value::Quantitative(_) => None,
        }
    }

    /// Categorical value as text with trailing NUL padding removed
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        self.as_bytes().map(|b| String::from_utf8_lossy(trim_padding(b)))
    }

    pub fn is_quantitative(&self) -> bool {
        matches!(self, Value::Quantitative(_))
    }

    /// Get the kind name of this value
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Quantitative(_) => "quantitative",
            Value::Categorical(_) => "categorical",
        }
    }
}

/// Strip trailing NUL padding from a categorical blob
pub fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    &bytes[..end]
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Quantitative(n) => write!(f, "{}", n),
            Value::Categorical(b) => write!(f, "{}", String::from_utf8_lossy(trim_padding(b))),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Quantitative(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Quantitative(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::text(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Categorical(v.into_bytes())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Categorical(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_padding() {
        assert_eq!(trim_padding(b"bob\0\0\0"), b"bob");
        assert_eq!(trim_padding(b"\0\0"), b"");
        assert_eq!(trim_padding(b"a\0b\0"), b"a\0b");
    }

    #[test]
    fn test_value_accessors() {
        let v = Value::Categorical(b"al\0\0".to_vec());
        assert_eq!(v.as_text().unwrap(), "al");
        assert_eq!(v.as_f64(), None);
        assert_eq!(v.to_string(), "al");

        let q = Value::from(2.5);
        assert_eq!(q.as_f64(), Some(2.5));
        assert!(q.as_bytes().is_none());
        assert_eq!(q.kind_name(), "quantitative");
    }

    #[test]
    fn test_value_equality_is_bitwise() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(0.0), Value::from(-0.0));
        assert_ne!(Value::from(1.0), Value::text("1"));
    }
}
