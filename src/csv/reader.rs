//! Line-level CSV reading
//!
//! Lines are `\n` terminated; a trailing `\r` is dropped and empty lines are
//! skipped. Fields are separated by every comma, there is no quoting.

use crate::error::{Error, Result};
use std::io::BufRead;

/// Reads CSV records one line at a time, counting physical lines
pub(crate) struct LineReader<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Continue numbering from `line` (used after rewinding past the header)
    pub(crate) fn starting_at(reader: R, line: usize) -> Self {
        Self {
            reader,
            buf: String::new(),
            line,
        }
    }

    /// Read the next physical line, including empty ones
    pub(crate) fn next_line(&mut self) -> Result<Option<(usize, &str)>> {
        Ok(self.fill()?.map(|len| (self.line, &self.buf[..len])))
    }

    /// Read the next non-empty line
    pub(crate) fn next_record(&mut self) -> Result<Option<(usize, &str)>> {
        loop {
            match self.fill()? {
                None => return Ok(None),
                Some(0) => continue,
                Some(len) => return Ok(Some((self.line, &self.buf[..len]))),
            }
        }
    }

    /// Load one line into `buf`; returns its length without the terminator
    fn fill(&mut self) -> Result<Option<usize>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let text = self.buf.strip_suffix('\n').unwrap_or(self.buf.as_str());
        let text = text.strip_suffix('\r').unwrap_or(text);
        Ok(Some(text.len()))
    }
}

/// Read the header line and split it into column identifiers
pub(crate) fn read_header<R: BufRead>(lines: &mut LineReader<R>) -> Result<Vec<String>> {
    match lines.next_line()? {
        Some((_, header)) if !header.is_empty() => {
            Ok(split_fields(header).map(str::to_string).collect())
        }
        _ => Err(Error::MissingHeader),
    }
}

/// Split a record into its fields
pub(crate) fn split_fields(line: &str) -> std::str::Split<'_, char> {
    line.split(',')
}
