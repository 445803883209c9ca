//! Catalog module
//!
//! This module contains column descriptors, schemas and column types.

pub mod schema;
pub mod types;

pub use schema::{Column, Schema};
pub use types::{ColumnKind, ColumnRole, NumericType};
