//! Row store for RowStore
//!
//! This module combines a schema with an ordered sequence of packed rows.
//! Every row buffer is exactly `schema.row_width()` bytes long; operations
//! that change the layout rebuild every row before the new schema is
//! committed, so a failure leaves the store untouched.

use super::field::{encode_field, FieldMut, FieldRef};
use super::row::Row;
use super::value::Value;
use crate::catalog::{Column, ColumnKind, Schema};
use crate::error::{Error, Result};
use indexmap::IndexSet;
use tracing::debug;

/// Number of distinct values a column can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Quantitative columns are treated as continuous
    Unbounded,
    /// Distinct byte blobs seen in a categorical column
    Finite(usize),
}

/// An in-memory table of packed rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowStore {
    /// Row layout
    schema: Schema,
    /// Rows in insertion order
    rows: Vec<Row>,
}

impl RowStore {
    /// Create an empty store; the schema must have at least one column
    pub fn new(schema: Schema) -> Result<Self> {
        if schema.is_empty() {
            return Err(Error::EmptySchema);
        }
        Ok(Self {
            schema,
            rows: Vec::new(),
        })
    }

    /// Get the store's schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Consume the store and return its schema
    pub fn into_schema(self) -> Schema {
        self.schema
    }

    pub fn column_count(&self) -> usize {
        self.schema.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_width(&self) -> usize {
        self.schema.row_width()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a copy of `bytes` as a new row
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_width(bytes)?;
        self.rows.push(Row::from_bytes(bytes));
        Ok(())
    }

    /// Insert a copy of `bytes` before row `index` (`index == row_count()` appends)
    pub fn insert(&mut self, index: usize, bytes: &[u8]) -> Result<()> {
        if index > self.rows.len() {
            return Err(Error::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        self.check_width(bytes)?;
        self.rows.insert(index, Row::from_bytes(bytes));
        Ok(())
    }

    /// Take ownership of an already packed row buffer
    pub(crate) fn push_row(&mut self, bytes: Box<[u8]>) -> Result<()> {
        self.check_width(&bytes)?;
        self.rows.push(Row::from_boxed(bytes));
        Ok(())
    }

    /// Encode one value per column and append the resulting row
    pub fn append_values(&mut self, values: &[Value]) -> Result<()> {
        let bytes = self.encode_values(values)?;
        self.rows.push(Row::from_boxed(bytes));
        Ok(())
    }

    /// Pack one value per column into a row buffer laid out by the schema
    pub fn encode_values(&self, values: &[Value]) -> Result<Box<[u8]>> {
        if values.len() != self.schema.column_count() {
            return Err(Error::InvalidOperation(format!(
                "expected {} values, got {}",
                self.schema.column_count(),
                values.len()
            )));
        }
        let mut buf = vec![0u8; self.schema.row_width()].into_boxed_slice();
        for (column, value) in self.schema.columns().iter().zip(values) {
            encode_field(column, value, &mut buf[column.range()])?;
        }
        Ok(buf)
    }

    /// Remove and return row `index`
    pub fn remove_row(&mut self, index: usize) -> Result<Row> {
        self.check_index(index)?;
        Ok(self.rows.remove(index))
    }

    /// Remove every row, keeping the schema
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Get row `index`
    pub fn row(&self, index: usize) -> Result<&Row> {
        self.check_index(index)?;
        Ok(&self.rows[index])
    }

    /// Get row `index` for in-place field writes
    pub fn row_mut(&mut self, index: usize) -> Result<&mut Row> {
        self.check_index(index)?;
        Ok(&mut self.rows[index])
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// View column `name` of row `index`
    pub fn field(&self, index: usize, name: &str) -> Result<FieldRef<'_>> {
        let column = self.schema.require(name)?;
        self.row(index)?.field(column)
    }

    /// View the column at position `column_index` of row `index`
    pub fn field_at(&self, index: usize, column_index: usize) -> Result<FieldRef<'_>> {
        let column = self
            .schema
            .column_at(column_index)
            .ok_or(Error::ColumnOutOfRange {
                index: column_index,
                len: self.schema.column_count(),
            })?;
        self.row(index)?.field(column)
    }

    /// Writable view of column `name` of row `index`
    pub fn field_mut(&mut self, index: usize, name: &str) -> Result<FieldMut<'_>> {
        let column = self.schema.require(name)?;
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(Error::RowOutOfRange { index, len })?;
        row.field_mut(column)
    }

    /// Iterate over the fields of column `name`, one per row
    pub fn column_fields<'a>(
        &'a self,
        name: &str,
    ) -> Result<impl Iterator<Item = FieldRef<'a>> + 'a> {
        let column = self.schema.require(name)?;
        Ok(self
            .rows
            .iter()
            .map(move |row| FieldRef::new(column, &row.as_bytes()[column.range()])))
    }

    /// Drop column `name` and re-pack every row.
    ///
    /// Surviving fields are copied from their old byte range, located by
    /// identifier in the old schema, into their new byte range.
    pub fn remove_column(&mut self, name: &str) -> Result<()> {
        let new_schema = self.schema.without(name)?;
        if new_schema.is_empty() {
            return Err(Error::InvalidOperation(format!(
                "cannot remove '{}', the last remaining column",
                name
            )));
        }

        let moves = new_schema
            .columns()
            .iter()
            .map(|col| {
                self.schema
                    .require(col.name())
                    .map(|old| (old.range(), col.range()))
            })
            .collect::<Result<Vec<_>>>()?;

        let staged: Vec<Row> = self
            .rows
            .iter()
            .map(|row| {
                let mut buf = vec![0u8; new_schema.row_width()].into_boxed_slice();
                for (from, to) in &moves {
                    buf[to.clone()].copy_from_slice(&row.as_bytes()[from.clone()]);
                }
                Row::from_boxed(buf)
            })
            .collect();

        debug!(
            column = name,
            rows = staged.len(),
            old_width = self.schema.row_width(),
            new_width = new_schema.row_width(),
            "removed column"
        );
        self.rows = staged;
        self.schema = new_schema;
        Ok(())
    }

    /// Add column `new_name` computed from column `from_name`.
    ///
    /// The new column has the source's role and kind. Quantitative results
    /// keep the source representation; categorical results are sized to the
    /// longest blob produced. Every row is extended with the result of
    /// `transform` applied to its source field.
    pub fn derive_column<F>(
        &mut self,
        new_name: &str,
        from_name: &str,
        mut transform: F,
    ) -> Result<()>
    where
        F: FnMut(&Value) -> Value,
    {
        if new_name == from_name {
            return Err(Error::InvalidOperation(format!(
                "derived column '{}' conflicts with its source",
                new_name
            )));
        }
        if self.schema.find(new_name).is_some() {
            return Err(Error::DuplicateColumn(new_name.to_string()));
        }
        let source = self.schema.require(from_name)?;

        let mut results = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let value = transform(&row.field(source)?.value());
            if value.is_quantitative() != source.kind().is_quantitative() {
                return Err(Error::TypeMismatch {
                    column: new_name.to_string(),
                    expected: source.kind().name().to_string(),
                    found: value.kind_name().to_string(),
                });
            }
            results.push(value);
        }

        let width = match source.kind() {
            ColumnKind::Quantitative(n) => n.width(),
            ColumnKind::Categorical if results.is_empty() => source.width(),
            ColumnKind::Categorical => results
                .iter()
                .filter_map(|v| v.as_bytes().map(<[u8]>::len))
                .max()
                .unwrap_or(0)
                .max(1),
        };

        let mut new_schema = self.schema.clone();
        new_schema.add_column(Column::new(new_name, source.role(), source.kind(), width))?;
        let derived = new_schema.require(new_name)?;
        let old_width = self.schema.row_width();

        let mut staged = Vec::with_capacity(self.rows.len());
        for (row, value) in self.rows.iter().zip(&results) {
            let mut buf = vec![0u8; new_schema.row_width()].into_boxed_slice();
            buf[..old_width].copy_from_slice(row.as_bytes());
            encode_field(derived, value, &mut buf[derived.range()])?;
            staged.push(Row::from_boxed(buf));
        }

        debug!(
            column = new_name,
            source = from_name,
            width,
            rows = staged.len(),
            "derived column"
        );
        self.rows = staged;
        self.schema = new_schema;
        Ok(())
    }

    /// Check if every column is quantitative
    pub fn is_all_quantitative(&self) -> bool {
        self.schema
            .columns()
            .iter()
            .all(|c| c.kind().is_quantitative())
    }

    /// Check if every column is categorical
    pub fn is_all_categorical(&self) -> bool {
        self.schema
            .columns()
            .iter()
            .all(|c| c.kind().is_categorical())
    }

    /// Distinct raw blobs of categorical column `name`, in first-seen order
    pub fn distinct_values(&self, name: &str) -> Result<IndexSet<&[u8]>> {
        let column = self.schema.require(name)?;
        if !column.kind().is_categorical() {
            return Err(Error::TypeMismatch {
                column: name.to_string(),
                expected: "categorical".to_string(),
                found: column.kind().name().to_string(),
            });
        }
        Ok(self
            .rows
            .iter()
            .map(|row| &row.as_bytes()[column.range()])
            .collect())
    }

    /// Number of values column `name` can take
    pub fn distinct_value_count(&self, name: &str) -> Result<Cardinality> {
        let column = self.schema.require(name)?;
        match column.kind() {
            ColumnKind::Quantitative(_) => Ok(Cardinality::Unbounded),
            ColumnKind::Categorical => Ok(Cardinality::Finite(self.distinct_values(name)?.len())),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(Error::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    fn check_width(&self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != self.schema.row_width() {
            return Err(Error::RowWidthMismatch {
                expected: self.schema.row_width(),
                actual: bytes.len(),
            });
        }
        Ok(())
    }
}
