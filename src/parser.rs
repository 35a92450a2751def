//! Access Log Parsing
//!
//! Turns lines of the default nginx `combined` log format into [`Record`]s. Lines are split
//! into fields the way a space separated CSV file is: fields containing spaces are wrapped in
//! one pair of double quotes, which the tokenizer strips. The bracketed timestamp contains a
//! space, so it arrives as two fields and is rejoined before parsing.
//!
//! Parsing a stream is all-or-nothing: the first malformed line aborts the whole stream and
//! its 0-based index is reported. The one leniency is the request line, which may be `-` or
//! otherwise fail to split into method, url and version without failing the record.

use crate::error::{FormatError, ParseError};
use crate::file_discovery::{open_log, LogKind};
use crate::models::Record;
use crate::timestamp_parser::TimestampParser;
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Number of fields in one tokenized line
pub const FIELD_COUNT: usize = 10;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b' ')
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

/// Build a record from one tokenized line.
///
/// ```text
/// 0: remote IP
/// 1: always "-"
/// 2: remote user
/// 3+4: "[14/Nov/2013:06:59:03" "+0000]"
/// 5: request line
/// 6: status
/// 7: body bytes
/// 8: referer
/// 9: user agent
/// ```
pub fn parse_fields<S: AsRef<str>>(fields: &[S]) -> Result<Record, FormatError> {
    if fields.len() != FIELD_COUNT {
        return Err(FormatError::FieldCount {
            found: fields.len(),
        });
    }
    let field = |i: usize| fields[i].as_ref();

    // Resplice together the timestamp from fields 3 and 4
    let ts = format!("{} {}", field(3), field(4));
    let timestamp = TimestampParser::parse(&ts)
        .map_err(|source| FormatError::Timestamp { value: ts, source })?;

    let request = field(5).to_string();
    let (method, url, version) = split_request(&request);

    let status = field(6)
        .parse::<i32>()
        .map_err(|source| FormatError::Status {
            value: field(6).to_string(),
            source,
        })?;
    let bytes = field(7)
        .parse::<i64>()
        .map_err(|source| FormatError::Bytes {
            value: field(7).to_string(),
            source,
        })?;

    Ok(Record {
        ip: field(0).to_string(),
        user: field(2).to_string(),
        timestamp,
        request,
        method,
        url,
        version,
        status,
        bytes,
        referer: field(8).to_string(),
        agent: field(9).to_string(),
    })
}

/// Method, url and version, or three empty strings unless there are exactly three parts.
fn split_request(request: &str) -> (String, String, String) {
    let parts: Vec<&str> = request.split(' ').collect();
    match parts.as_slice() {
        [method, url, version] => (method.to_string(), url.to_string(), version.to_string()),
        _ => (String::new(), String::new(), String::new()),
    }
}

/// Tokenize and parse a single raw line
pub fn parse_line(line: &str) -> Result<Record, FormatError> {
    let mut reader = csv_reader(line.as_bytes());
    let mut fields = csv::StringRecord::new();
    reader.read_record(&mut fields)?;
    let fields: Vec<&str> = fields.iter().collect();
    parse_fields(&fields)
}

// Trait for consuming records as a stream is parsed
pub trait RecordProcessor {
    type Output;

    fn process_record(&mut self, record: Record, index: usize);
    fn finalize(self) -> Self::Output;
}

/// Default processor that collects every record into a Vec
#[derive(Default)]
pub struct CollectorProcessor {
    records: Vec<Record>,
}

impl CollectorProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordProcessor for CollectorProcessor {
    type Output = Vec<Record>;

    fn process_record(&mut self, record: Record, _index: usize) {
        self.records.push(record);
    }

    fn finalize(self) -> Self::Output {
        self.records
    }
}

/// Parse one physical line, or `None` for an empty one. A trailing `\r` is dropped so CRLF
/// files parse like LF ones.
fn parse_indexed(line: &str, index: usize) -> Result<Option<Record>, ParseError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }
    parse_line(line)
        .map(Some)
        .map_err(|source| ParseError::Line { index, source })
}

/// Parse a whole byte stream, handing each record to `processor` in order.
///
/// Stops at the first malformed line; the processor's output is only returned on success.
/// Empty lines are skipped but still count towards the reported index.
pub fn process_reader<R: Read, P: RecordProcessor>(
    reader: R,
    mut processor: P,
) -> Result<P::Output, ParseError> {
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|source| ParseError::Read { index, source })?;
        if let Some(record) = parse_indexed(&line, index)? {
            processor.process_record(record, index);
        }
    }

    Ok(processor.finalize())
}

/// Parse a whole byte stream (plain, or already decompressed) into records
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Record>, ParseError> {
    process_reader(reader, CollectorProcessor::new())
}

/// Parse already split lines, with the same rules as [`parse_reader`].
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<Record>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut processor = CollectorProcessor::new();
    for (index, line) in lines.into_iter().enumerate() {
        if let Some(record) = parse_indexed(line.as_ref(), index)? {
            processor.process_record(record, index);
        }
    }
    Ok(processor.finalize())
}

/// Opens and parses log files from disk
#[derive(Default)]
pub struct FileParser;

impl FileParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_file(&self, path: &Path, kind: LogKind) -> Result<Vec<Record>> {
        let reader = open_log(path, kind)?;
        let records = parse_reader(reader)
            .with_context(|| format!("Error while parsing {} file {}", kind, path.display()))?;
        debug!(path = %path.display(), records = records.len(), "Parsed log file");
        Ok(records)
    }
}
