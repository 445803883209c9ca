//! Storage module
//!
//! This module contains the in-memory storage components:
//! - Decoded field values
//! - Packed row buffers and field views
//! - The row store

pub mod field;
pub mod row;
pub mod row_store;
pub mod value;

pub use field::{FieldMut, FieldRef};
pub use row::Row;
pub use row_store::{Cardinality, RowStore};
pub use value::{trim_padding, Value};
