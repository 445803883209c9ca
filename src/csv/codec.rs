//! Fixed-schema CSV codec
//!
//! Decoding parses every field positionally against a finalized schema and
//! packs it into a row buffer; encoding renders rows back to text.

use super::infer::infer_schema;
use super::numeral::parse_numeral;
use super::options::{CsvOptions, OversizePolicy};
use super::reader::{split_fields, LineReader};
use crate::catalog::{ColumnKind, Schema};
use crate::error::{Error, Result};
use crate::storage::{trim_padding, RowStore};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{info, warn};

/// Decode CSV text into a new store laid out by `schema`
pub fn decode<R: BufRead>(reader: R, schema: Schema, options: &CsvOptions) -> Result<RowStore> {
    let mut store = RowStore::new(schema)?;
    let mut lines = LineReader::new(reader);
    if options.has_header {
        lines.next_line()?;
    }

    let schema = store.schema().clone();
    let columns = schema.columns();
    let expected = columns.len();
    let mut truncated = 0usize;

    while let Some((line, record)) = lines.next_record()? {
        let mut buf = vec![0u8; schema.row_width()].into_boxed_slice();
        let mut found = 0;

        for field in split_fields(record) {
            let column = columns
                .get(found)
                .ok_or(Error::TooManyFields { line, expected })?;
            let dest = &mut buf[column.range()];
            match column.kind() {
                ColumnKind::Quantitative(numeric) => {
                    let value = parse_numeral(field).ok_or_else(|| Error::InvalidNumeral {
                        line,
                        column: column.name().to_string(),
                        value: field.to_string(),
                    })?;
                    if !numeric.fits(value) {
                        return Err(Error::NumeralOutOfRange {
                            line,
                            column: column.name().to_string(),
                            value: field.to_string(),
                            numeric,
                        });
                    }
                    numeric.encode(value, dest);
                }
                ColumnKind::Categorical => {
                    let bytes = field.as_bytes();
                    if bytes.len() > column.width() {
                        if options.oversize == OversizePolicy::Reject {
                            return Err(Error::ValueTooLarge {
                                column: column.name().to_string(),
                                width: column.width(),
                                len: bytes.len(),
                            });
                        }
                        truncated += 1;
                    }
                    let len = bytes.len().min(column.width());
                    dest[..len].copy_from_slice(&bytes[..len]);
                }
            }
            found += 1;
        }

        if found < expected {
            return Err(Error::TooFewFields {
                line,
                expected,
                found,
            });
        }
        store.push_row(buf)?;
    }

    if truncated > 0 {
        warn!(fields = truncated, "truncated categorical values wider than their column");
    }
    info!(rows = store.row_count(), row_width = store.row_width(), "decoded CSV");
    Ok(store)
}

/// Write `store` as CSV: a header of column ids, then one line per row
pub fn encode<W: Write>(store: &RowStore, mut writer: W, options: &CsvOptions) -> Result<()> {
    let columns = store.schema().columns();
    writer.write_all(store.schema().column_ids().join(",").as_bytes())?;
    writer.write_all(b"\n")?;

    for row in store.rows() {
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                writer.write_all(b",")?;
            }
            let field = row.field(column)?;
            match column.kind() {
                ColumnKind::Quantitative(numeric) => {
                    let value = numeric.decode(field.raw());
                    if !value.is_finite() {
                        return Err(Error::NonFiniteValue {
                            column: column.name().to_string(),
                            value,
                        });
                    }
                    writer.write_all(numeric.format(value).as_bytes())?;
                }
                ColumnKind::Categorical if options.trim_padding => {
                    writer.write_all(trim_padding(field.raw()))?;
                }
                ColumnKind::Categorical => writer.write_all(field.raw())?,
            }
        }
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    info!(rows = store.row_count(), "encoded CSV");
    Ok(())
}

/// Infer a schema from a seekable stream positioned at its header, then
/// decode it from that same position
pub fn load<R: BufRead + Seek>(mut reader: R, options: &CsvOptions) -> Result<RowStore> {
    let start = reader.stream_position()?;
    let inference = infer_schema(&mut reader, options)?;
    reader.seek(SeekFrom::Start(start))?;
    decode(reader, inference.schema, &options.clone().has_header(true))
}

/// Read a CSV file, inferring its schema from the data
pub fn read_csv(path: impl AsRef<Path>, options: &CsvOptions) -> Result<RowStore> {
    let file = File::open(path)?;
    load(BufReader::new(file), options)
}

/// Read a CSV file with a known schema
pub fn read_csv_with_schema(
    path: impl AsRef<Path>,
    schema: Schema,
    options: &CsvOptions,
) -> Result<RowStore> {
    let file = File::open(path)?;
    decode(BufReader::new(file), schema, options)
}

/// Write a store to a CSV file
pub fn write_csv(store: &RowStore, path: impl AsRef<Path>, options: &CsvOptions) -> Result<()> {
    let file = File::create(path)?;
    encode(store, BufWriter::new(file), options)
}
