//! CSV module
//!
//! This module contains the CSV front end:
//! - Line reading and field splitting
//! - Numeral recognition
//! - Schema inference
//! - The fixed-schema codec

pub mod codec;
pub mod infer;
pub mod numeral;
pub mod options;
mod reader;

pub use codec::{decode, encode, load, read_csv, read_csv_with_schema, write_csv};
pub use infer::{infer_schema, infer_schema_buffered, Inference};
pub use numeral::{is_numeral, parse_numeral};
pub use options::{CsvOptions, OversizePolicy};
