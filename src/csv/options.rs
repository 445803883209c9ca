//! CSV options for RowStore

use crate::catalog::{ColumnRole, NumericType};

/// What to do with a categorical value longer than its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizePolicy {
    /// Keep the first `width` bytes
    #[default]
    Truncate,
    /// Fail with a format error
    Reject,
}

/// Options shared by CSV inference, decoding and encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Whether the first line is a header (always read by inference)
    pub has_header: bool,
    /// Representation given to inferred quantitative columns
    pub numeric: NumericType,
    /// Role given to inferred columns
    pub role: ColumnRole,
    /// Handling of oversize categorical values while decoding
    pub oversize: OversizePolicy,
    /// Strip trailing NUL padding from categorical fields while encoding
    pub trim_padding: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            numeric: NumericType::F64,
            role: ColumnRole::Explanatory,
            oversize: OversizePolicy::Truncate,
            trim_padding: false,
        }
    }
}

impl CsvOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the input has a header line
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the representation of inferred quantitative columns
    pub fn numeric(mut self, numeric: NumericType) -> Self {
        self.numeric = numeric;
        self
    }

    /// Set the role of inferred columns
    pub fn role(mut self, role: ColumnRole) -> Self {
        self.role = role;
        self
    }

    /// Set the oversize policy
    pub fn oversize(mut self, oversize: OversizePolicy) -> Self {
        self.oversize = oversize;
        self
    }

    /// Set whether encoding strips categorical padding
    pub fn trim_padding(mut self, trim: bool) -> Self {
        self.trim_padding = trim;
        self
    }
}
