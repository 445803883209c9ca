//! RowStore - an in-memory, schema-packed row store
//!
//! This library provides:
//! - Column descriptors and schemas that fix the byte layout of a row
//! - A row store of packed, fixed-width rows with typed field views
//! - CSV schema inference and a fixed-schema CSV codec
//! - Basic statistics over quantitative columns

pub mod catalog;
pub mod csv;
pub mod error;
pub mod stats;
pub mod storage;

pub use catalog::{Column, ColumnKind, ColumnRole, NumericType, Schema};
pub use error::{Error, Result};
pub use storage::{Cardinality, FieldMut, FieldRef, Row, RowStore, Value};
