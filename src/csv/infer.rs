//! CSV schema inference
//!
//! Column kinds and widths are discovered by scanning the data lines. Every
//! column starts out quantitative with an unknown width. A numeral fixes a
//! quantitative column's width to the numeric representation; anything else
//! turns the column categorical and grows its width to the longest field
//! seen plus one terminator byte.
//!
//! A non-numeral in a column that an earlier line already committed to
//! quantitative is a contradiction: the column becomes categorical with an
//! unknown width and the scan restarts from the first data line so that the
//! earlier numerals are measured as text. Decisions made for other columns
//! are kept across restarts. A column can only flip once, so the number of
//! restarts is bounded by the column count.
//!
//! Empty fields are evidence against a quantitative column but carry no
//! width. A column that never saw a non-empty value cannot be sized.

use super::numeral::is_numeral;
use super::options::CsvOptions;
use super::reader::{read_header, split_fields, LineReader};
use crate::catalog::{Column, Schema};
use crate::error::{Error, Result};
use std::io::{BufRead, Cursor, Read, Seek, SeekFrom};
use tracing::{debug, info};

/// Outcome of a schema inference run
#[derive(Debug, Clone)]
pub struct Inference {
    /// Finalized schema, offsets assigned in header order
    pub schema: Schema,
    /// Number of times the scan rewound to the first data line
    pub restarts: usize,
    /// Number of passes over the data section (`restarts + 1`)
    pub passes: usize,
    /// Data lines inspected over all passes
    pub lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuessKind {
    Quantitative,
    Categorical,
}

/// Per-column inference state
#[derive(Debug, Clone)]
struct Guess {
    name: String,
    kind: GuessKind,
    width: Option<usize>,
}

/// What a single field did to its column's guess
#[derive(Debug, PartialEq, Eq)]
enum Observation {
    Consistent,
    Contradiction,
}

impl Guess {
    fn new(name: String) -> Self {
        Self {
            name,
            kind: GuessKind::Quantitative,
            width: None,
        }
    }

    fn observe(&mut self, field: &str, numeric_width: usize) -> Observation {
        if self.kind == GuessKind::Quantitative && is_numeral(field) {
            self.width.get_or_insert(numeric_width);
            return Observation::Consistent;
        }

        if self.kind == GuessKind::Quantitative && self.width.is_some() {
            self.kind = GuessKind::Categorical;
            self.width = None;
            return Observation::Contradiction;
        }

        self.kind = GuessKind::Categorical;
        if !field.is_empty() {
            let needed = field.len() + 1;
            self.width = Some(self.width.map_or(needed, |w| w.max(needed)));
        }
        Observation::Consistent
    }
}

/// Infer a schema from a seekable CSV stream positioned at its header.
///
/// On return the stream is positioned at the end of the input.
pub fn infer_schema<R: BufRead + Seek>(
    reader: &mut R,
    options: &CsvOptions,
) -> Result<Inference> {
    let mut header = LineReader::new(&mut *reader);
    let mut guesses: Vec<Guess> = read_header(&mut header)?
        .into_iter()
        .map(Guess::new)
        .collect();
    drop(header);

    let data_start = reader.stream_position()?;
    let numeric_width = options.numeric.width();
    let expected = guesses.len();
    let mut restarts = 0;
    let mut lines = 0;

    'scan: loop {
        reader.seek(SeekFrom::Start(data_start))?;
        let mut records = LineReader::starting_at(&mut *reader, 1);

        while let Some((line, record)) = records.next_record()? {
            lines += 1;
            let mut found = 0;
            for field in split_fields(record) {
                let guess = guesses
                    .get_mut(found)
                    .ok_or(Error::TooManyFields { line, expected })?;
                if guess.observe(field, numeric_width) == Observation::Contradiction {
                    restarts += 1;
                    debug!(
                        column = %guess.name,
                        line,
                        restarts,
                        "type contradiction, restarting scan"
                    );
                    continue 'scan;
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
        }
        break;
    }

    let mut schema = Schema::new();
    for guess in guesses {
        let column = match (guess.kind, guess.width) {
            (_, None) => return Err(Error::UndeterminedWidth(guess.name)),
            (GuessKind::Quantitative, Some(_)) => {
                Column::quantitative(guess.name, options.role, options.numeric)
            }
            (GuessKind::Categorical, Some(width)) => {
                Column::categorical(guess.name, options.role, width)
            }
        };
        schema.add_column(column)?;
    }

    info!(
        columns = schema.column_count(),
        row_width = schema.row_width(),
        restarts,
        lines,
        "inferred CSV schema"
    );
    Ok(Inference {
        schema,
        restarts,
        passes: restarts + 1,
        lines,
    })
}

/// Infer a schema from a non-seekable source by buffering it once.
///
/// Returns the buffered input so it can be decoded without re-reading the
/// source.
pub fn infer_schema_buffered<R: Read>(
    mut reader: R,
    options: &CsvOptions,
) -> Result<(Inference, Cursor<Vec<u8>>)> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let mut cursor = Cursor::new(data);
    let inference = infer_schema(&mut cursor, options)?;
    cursor.set_position(0);
    Ok((inference, cursor))
}
