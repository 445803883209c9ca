//! Column types for RowStore
//!
//! This module defines column roles, column kinds and the fixed-width numeric
//! representations quantitative columns are stored with.

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a column plays in an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Input / predictor variable
    #[default]
    Explanatory,
    /// Outcome variable
    Response,
    /// Anything else (ids, labels, ...)
    Other,
}

/// Binary representation of a quantitative column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NumericType {
    /// 32-bit float
    F32,
    /// 64-bit float
    #[default]
    F64,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
}

impl NumericType {
    /// Size in bytes of one encoded value
    pub fn width(&self) -> usize {
        match self {
            NumericType::F32 | NumericType::I32 => 4,
            NumericType::F64 | NumericType::I64 => 8,
        }
    }

    /// Check that `value` is finite and, truncated toward zero for the
    /// integer representations, inside the type's range
    pub fn fits(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            NumericType::F32 => value.abs() <= f32::MAX as f64,
            NumericType::F64 => true,
            NumericType::I32 => {
                let t = value.trunc();
                t >= i32::MIN as f64 && t <= i32::MAX as f64
            }
            // i64::MAX is not representable; 2^63 is the first value past it
            NumericType::I64 => {
                let t = value.trunc();
                t >= i64::MIN as f64 && t < 9_223_372_036_854_775_808.0
            }
        }
    }

    /// Encode `value` into `buf`, which must be exactly `width()` bytes.
    ///
    /// Integer representations truncate toward zero and saturate at the type
    /// bounds; callers that must not lose range check [`NumericType::fits`]
    /// first.
    pub fn encode(&self, value: f64, buf: &mut [u8]) {
        match self {
            NumericType::F32 => LittleEndian::write_f32(buf, value as f32),
            NumericType::F64 => LittleEndian::write_f64(buf, value),
            NumericType::I32 => LittleEndian::write_i32(buf, value as i32),
            NumericType::I64 => LittleEndian::write_i64(buf, value as i64),
        }
    }

    /// Decode a value previously written by [`NumericType::encode`]
    pub fn decode(&self, buf: &[u8]) -> f64 {
        match self {
            NumericType::F32 => LittleEndian::read_f32(buf) as f64,
            NumericType::F64 => LittleEndian::read_f64(buf),
            NumericType::I32 => LittleEndian::read_i32(buf) as f64,
            NumericType::I64 => LittleEndian::read_i64(buf) as f64,
        }
    }

    /// Render a decoded value the way it should appear in text output
    pub fn format(&self, value: f64) -> String {
        match self {
            NumericType::F32 => format!("{}", value as f32),
            NumericType::F64 => format!("{}", value),
            NumericType::I32 | NumericType::I64 => format!("{}", value as i64),
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericType::F32 => write!(f, "F32"),
            NumericType::F64 => write!(f, "F64"),
            NumericType::I32 => write!(f, "I32"),
            NumericType::I64 => write!(f, "I64"),
        }
    }
}

/// Kind of data a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Fixed-width, NUL-padded byte blob
    Categorical,
    /// Fixed-width number
    Quantitative(NumericType),
}

impl ColumnKind {
    /// Check if this kind is quantitative
    pub fn is_quantitative(&self) -> bool {
        matches!(self, ColumnKind::Quantitative(_))
    }

    /// Check if this kind is categorical
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnKind::Categorical)
    }

    /// Width dictated by the kind itself, if any
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            ColumnKind::Categorical => None,
            ColumnKind::Quantitative(n) => Some(n.width()),
        }
    }

    /// Short name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Categorical => "categorical",
            ColumnKind::Quantitative(_) => "quantitative",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Categorical => write!(f, "CATEGORICAL"),
            ColumnKind::Quantitative(n) => write!(f, "QUANTITATIVE({})", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_width() {
        assert_eq!(NumericType::F64.width(), 8);
        assert_eq!(NumericType::I32.width(), 4);
        assert_eq!(ColumnKind::Quantitative(NumericType::F32).fixed_width(), Some(4));
        assert_eq!(ColumnKind::Categorical.fixed_width(), None);
    }

    #[test]
    fn test_numeric_encode_decode() {
        let mut buf = [0u8; 8];
        NumericType::F64.encode(1.5, &mut buf);
        assert_eq!(buf, 1.5f64.to_le_bytes());
        assert_eq!(NumericType::F64.decode(&buf), 1.5);

        let mut buf = [0u8; 4];
        NumericType::I32.encode(-7.9, &mut buf);
        assert_eq!(NumericType::I32.decode(&buf), -7.0);
    }

    #[test]
    fn test_numeric_format() {
        assert_eq!(NumericType::F64.format(2.5), "2.5");
        assert_eq!(NumericType::I64.format(42.0), "42");
    }

    #[test]
    fn test_numeric_fits() {
        assert!(NumericType::I32.fits(2147483647.5));
        assert!(!NumericType::I32.fits(2147483648.0));
        assert!(NumericType::I32.fits(-2147483648.9));
        assert!(!NumericType::I64.fits(9.3e18));
        assert!(NumericType::F32.fits(3.0e38));
        assert!(!NumericType::F32.fits(1.0e39));
        assert!(!NumericType::F64.fits(f64::INFINITY));
        assert!(!NumericType::F64.fits(f64::NAN));
    }
}
