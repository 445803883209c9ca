//! Error types for RowStore
//!
//! This module defines all error types raised by the schema, the row store
//! and the CSV codec.

use crate::catalog::NumericType;
use thiserror::Error;

/// The main error type for RowStore
#[derive(Error, Debug)]
pub enum Error {
    // ========== Format Errors ==========
    #[error("Format error: line {line} has too many fields (expected {expected})")]
    TooManyFields { line: usize, expected: usize },

    #[error("Format error: line {line} has too few fields (expected {expected}, found {found})")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Format error: line {line}, column '{column}': '{value}' is not a numeral")]
    InvalidNumeral {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Format error: line {line}, column '{column}': '{value}' does not fit {numeric}")]
    NumeralOutOfRange {
        line: usize,
        column: String,
        value: String,
        numeric: NumericType,
    },

    #[error("Format error: column '{column}' holds non-finite value {value}")]
    NonFiniteValue { column: String, value: f64 },

    #[error("Format error: value of {len} bytes does not fit column '{column}' ({width} bytes)")]
    ValueTooLarge {
        column: String,
        width: usize,
        len: usize,
    },

    #[error("Format error: missing header line")]
    MissingHeader,

    // ========== Schema Errors ==========
    #[error("Schema error: column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Schema error: column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("Schema error: a schema needs at least one column")]
    EmptySchema,

    #[error("Schema error: invalid width {width} for column '{column}'")]
    InvalidWidth { column: String, width: usize },

    #[error("Schema error: {0}")]
    InvalidOperation(String),

    // ========== Range Errors ==========
    #[error("Range error: row {index} out of range (row count {len})")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Range error: column {index} out of range (column count {len})")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("Range error: row buffer has {actual} bytes, row width is {expected}")]
    RowWidthMismatch { expected: usize, actual: usize },

    // ========== Type Errors ==========
    #[error("Type error: column '{column}' is {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: schema serialization failed: {0}")]
    Serialization(String),

    // ========== Inference Errors ==========
    #[error("Inference error: cannot determine the width of column '{0}'")]
    UndeterminedWidth(String),
}

/// Result type alias for RowStore operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ColumnNotFound("age".to_string());
        assert_eq!(err.to_string(), "Schema error: column 'age' not found");

        let err = Error::TooFewFields {
            line: 3,
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Format error: line 3 has too few fields (expected 2, found 1)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: Error = io.into();
        assert!(err.to_string().starts_with("I/O error:"));
    }
}
