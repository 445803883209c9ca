//! Field views for RowStore
//!
//! A field view pairs one column descriptor with the byte range it covers in
//! one row buffer. Reading never copies the row; decoding into a [`Value`]
//! happens at the column boundary using the column's kind.

use super::value::{trim_padding, Value};
use crate::catalog::{Column, ColumnKind};
use crate::error::{Error, Result};
use std::borrow::Cow;

/// Read-only view over one field of a row
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    column: &'a Column,
    bytes: &'a [u8],
}

impl<'a> FieldRef<'a> {
    pub(crate) fn new(column: &'a Column, bytes: &'a [u8]) -> Self {
        Self { column, bytes }
    }

    /// Descriptor this view was built from
    pub fn column(&self) -> &'a Column {
        self.column
    }

    /// The `width` bytes of the field, padding included
    pub fn raw(&self) -> &'a [u8] {
        self.bytes
    }

    /// Decode the field
    pub fn value(&self) -> Value {
        match self.column.kind() {
            ColumnKind::Quantitative(n) => Value::Quantitative(n.decode(self.bytes)),
            ColumnKind::Categorical => Value::Categorical(self.bytes.to_vec()),
        }
    }

    /// Decode a quantitative field
    pub fn as_f64(&self) -> Result<f64> {
        match self.column.kind() {
            ColumnKind::Quantitative(n) => Ok(n.decode(self.bytes)),
            ColumnKind::Categorical => Err(mismatch(self.column, "quantitative")),
        }
    }

    /// Categorical field as text, trailing NUL padding removed
    pub fn as_text(&self) -> Result<Cow<'a, str>> {
        match self.column.kind() {
            ColumnKind::Categorical => Ok(String::from_utf8_lossy(trim_padding(self.bytes))),
            ColumnKind::Quantitative(_) => Err(mismatch(self.column, "categorical")),
        }
    }
}

/// Writable view over one field of a row
#[derive(Debug)]
pub struct FieldMut<'a> {
    column: &'a Column,
    bytes: &'a mut [u8],
}

impl<'a> FieldMut<'a> {
    pub(crate) fn new(column: &'a Column, bytes: &'a mut [u8]) -> Self {
        Self { column, bytes }
    }

    pub fn column(&self) -> &Column {
        self.column
    }

    /// Mutable access to the raw field bytes
    pub fn raw_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> FieldRef<'_> {
        FieldRef::new(self.column, &*self.bytes)
    }

    /// Encode `value` into the field.
    ///
    /// Categorical blobs longer than the column are truncated to its width;
    /// shorter ones are NUL-padded.
    pub fn set(&mut self, value: &Value) -> Result<()> {
        encode_field(self.column, value, self.bytes)
    }

    /// Write a number into a quantitative field
    pub fn set_f64(&mut self, value: f64) -> Result<()> {
        self.set(&Value::Quantitative(value))
    }

    /// Write text into a categorical field
    pub fn set_text(&mut self, value: &str) -> Result<()> {
        self.set(&Value::text(value))
    }
}

/// Encode `value` into `buf`, which covers exactly the column's byte range
pub(crate) fn encode_field(column: &Column, value: &Value, buf: &mut [u8]) -> Result<()> {
    match (column.kind(), value) {
        (ColumnKind::Quantitative(n), Value::Quantitative(v)) => {
            n.encode(*v, buf);
            Ok(())
        }
        (ColumnKind::Categorical, Value::Categorical(blob)) => {
            let len = blob.len().min(buf.len());
            buf[..len].copy_from_slice(&blob[..len]);
            buf[len..].fill(0);
            Ok(())
        }
        (kind, _) => Err(Error::TypeMismatch {
            column: column.name().to_string(),
            expected: kind.name().to_string(),
            found: value.kind_name().to_string(),
        }),
    }
}

fn mismatch(column: &Column, expected: &str) -> Error {
    Error::TypeMismatch {
        column: column.name().to_string(),
        expected: expected.to_string(),
        found: column.kind().name().to_string(),
    }
}
