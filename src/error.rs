use std::num::ParseIntError;
use thiserror::Error;

/// A single line that does not fit the access log layout
#[derive(Error, Debug)]
pub enum FormatError {
    /// Wrong number of space separated fields
    #[error("expected 10 fields, found {found}")]
    FieldCount { found: usize },

    /// Bracketed timestamp did not match the nginx layout
    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid status code {value:?}: {source}")]
    Status {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid byte count {value:?}: {source}")]
    Bytes {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Quoting could not be split into fields
    #[error("unable to split line into fields: {0}")]
    Tokenize(#[from] csv::Error),
}

/// Failure of a whole-stream parse. Indexes are 0-based line numbers.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("error parsing line {index}: {source}")]
    Line {
        index: usize,
        #[source]
        source: FormatError,
    },

    /// Underlying reader failure, including gzip corruption and invalid UTF-8
    #[error("error reading line {index}: {source}")]
    Read {
        index: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// 0-based index of the failing line
    pub fn index(&self) -> usize {
        match self {
            ParseError::Line { index, .. } | ParseError::Read { index, .. } => *index,
        }
    }
}
