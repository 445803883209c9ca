//! Row buffers for RowStore
//!
//! A row is one fixed-size byte buffer laid out by the owning store's schema.

use super::field::{FieldMut, FieldRef};
use crate::catalog::Column;
use crate::error::{Error, Result};

/// A packed row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    data: Box<[u8]>,
}

impl Row {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Self { data: bytes.into() }
    }

    pub(crate) fn from_boxed(data: Box<[u8]>) -> Self {
        Self { data }
    }

    /// Raw row buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Size of the buffer in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the field `column` describes
    pub fn field<'a>(&'a self, column: &'a Column) -> Result<FieldRef<'a>> {
        let len = self.data.len();
        let bytes = self
            .data
            .get(column.range())
            .ok_or(Error::RowWidthMismatch {
                expected: column.range().end,
                actual: len,
            })?;
        Ok(FieldRef::new(column, bytes))
    }

    /// Writable view of the field `column` describes
    pub fn field_mut<'a>(&'a mut self, column: &'a Column) -> Result<FieldMut<'a>> {
        let len = self.data.len();
        let bytes = self
            .data
            .get_mut(column.range())
            .ok_or(Error::RowWidthMismatch {
                expected: column.range().end,
                actual: len,
            })?;
        Ok(FieldMut::new(column, bytes))
    }
}
