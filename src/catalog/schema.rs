//! Schema definitions for RowStore
//!
//! This module defines column descriptors and the ordered schema that fixes
//! the byte layout of every row.

use super::types::{ColumnKind, ColumnRole, NumericType};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Column descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column identifier
    name: String,
    /// Analysis role
    role: ColumnRole,
    /// Data kind
    kind: ColumnKind,
    /// Width in bytes
    width: usize,
    /// Byte offset inside a row, assigned by the owning schema
    #[serde(default)]
    offset: usize,
}

impl Column {
    /// Create a new column descriptor.
    ///
    /// The offset is assigned when the column is added to a [`Schema`].
    pub fn new(name: impl Into<String>, role: ColumnRole, kind: ColumnKind, width: usize) -> Self {
        Self {
            name: name.into(),
            role,
            kind,
            width,
            offset: 0,
        }
    }

    /// Create a quantitative column sized by its numeric representation
    pub fn quantitative(name: impl Into<String>, role: ColumnRole, numeric: NumericType) -> Self {
        Self::new(name, role, ColumnKind::Quantitative(numeric), numeric.width())
    }

    /// Create a categorical column of `width` bytes
    pub fn categorical(name: impl Into<String>, role: ColumnRole, width: usize) -> Self {
        Self::new(name, role, ColumnKind::Categorical, width)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> ColumnRole {
        self.role
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte range of this column inside a row
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.width
    }

    /// Set the analysis role
    pub fn with_role(mut self, role: ColumnRole) -> Self {
        self.role = role;
        self
    }

    fn validate(&self) -> Result<()> {
        let width_ok = match self.kind.fixed_width() {
            Some(fixed) => self.width == fixed,
            None => self.width > 0,
        };
        if !width_ok {
            return Err(Error::InvalidWidth {
                column: self.name.clone(),
                width: self.width,
            });
        }
        Ok(())
    }
}

/// Row layout - an ordered list of columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of columns
    columns: Vec<Column>,
    /// Column name to index mapping
    name_to_index: HashMap<String, usize>,
    /// Sum of all column widths
    row_width: usize,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            name_to_index: HashMap::new(),
            row_width: 0,
        }
    }

    /// Create a schema from a list of columns, assigning offsets in order
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut schema = Self::new();
        for col in columns {
            schema.add_column(col)?;
        }
        Ok(schema)
    }

    /// Append a column; its offset becomes the current row width
    pub fn add_column(&mut self, mut column: Column) -> Result<()> {
        column.validate()?;
        if self.name_to_index.contains_key(&column.name) {
            return Err(Error::DuplicateColumn(column.name));
        }
        column.offset = self.row_width;
        self.row_width += column.width;
        self.name_to_index
            .insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Find a column by name
    pub fn find(&self, name: &str) -> Option<&Column> {
        self.name_to_index.get(name).map(|&idx| &self.columns[idx])
    }

    /// Find a column by name, failing when it is absent
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.find(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Get column by index
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get column index by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Get all columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Size in bytes of one row
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Column identifiers in layout order
    pub fn column_ids(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Build the layout that results from dropping `name`.
    ///
    /// Every column after the dropped one moves down by its width.
    pub fn without(&self, name: &str) -> Result<Schema> {
        let removed = self.require(name)?;
        let (removed_offset, removed_width) = (removed.offset, removed.width);

        let mut columns = Vec::with_capacity(self.columns.len().saturating_sub(1));
        let mut name_to_index = HashMap::with_capacity(self.columns.len());
        for col in self.columns.iter().filter(|c| c.name != name) {
            let mut col = col.clone();
            if col.offset > removed_offset {
                col.offset -= removed_width;
            }
            name_to_index.insert(col.name.clone(), columns.len());
            columns.push(col);
        }

        Ok(Schema {
            columns,
            name_to_index,
            row_width: self.row_width - removed_width,
        })
    }

    /// Serialize the column list as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.columns).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parse a column list from JSON; offsets are recomputed
    pub fn from_json(json: &str) -> Result<Self> {
        let columns: Vec<Column> =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_columns(columns)
    }

    /// Save schema to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load schema from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}
