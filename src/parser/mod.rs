//! Line parser for network error logs.
//!
//! This module provides pure parsing functions for converting log lines
//! into validated [`LogRecord`]s. The accepted grammar is:
//!
//! ```text
//! <source>-><destination> <kind> <timestamp> [x<count>]
//! ```
//!
//! - `<source>`, `<destination>`: IPv4 address or hostname token. Hostnames
//!   start with a letter or digit and never end with `-`, so `a-->b` is
//!   rejected rather than read as `a-` and `b`.
//! - `<kind>`: `send_error` or `receive_error`
//! - `<timestamp>`: any non-empty token (RFC 3339 is interpreted when present)
//! - `x<count>`: optional repeat count, an integer in `1..=u64::MAX` (default 1)
//!
//! Blank lines and lines starting with `#` are ignored. Anything else that
//! does not match is reported as a [`MalformedLine`] and skipped. Input is
//! split into lines before decoding, so a line that is not UTF-8 is one more
//! malformed line rather than a failure of the whole file.

use crate::model::{ErrorKind, LogRecord, MalformedLine, NodeId, ParseError, Timestamp};
use std::path::{Path, PathBuf};
use tracing::warn;

const ARROW: &str = "->";
const COMMENT_PREFIX: char = '#';
const COUNT_PREFIX: char = 'x';

/// Result of parsing a single line with graceful error handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// The line is a valid failure record.
    Valid(LogRecord),
    /// Blank or comment line.
    Ignored,
    /// The line could not be parsed.
    Malformed(MalformedLine),
}

/// Parse a single log line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found on the line.
pub fn parse_line(raw: &str, line_number: usize) -> Result<Option<LogRecord>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }

    let mut tokens = trimmed.split_whitespace();

    // The first token always exists for a non-empty trimmed line
    let endpoints = tokens.next().unwrap_or_default();
    let (source, destination) = endpoints
        .split_once(ARROW)
        .ok_or(ParseError::UnrecognizedLine { line: line_number })?;

    let source = parse_node(source, line_number)?;
    let destination = parse_node(destination, line_number)?;
    if source == destination {
        return Err(ParseError::SelfLoop {
            line: line_number,
            node: source,
        });
    }

    let kind_token = tokens.next().ok_or(ParseError::MissingField {
        line: line_number,
        field: "kind",
    })?;
    let kind = ErrorKind::from_token(kind_token).ok_or_else(|| ParseError::UnknownErrorKind {
        line: line_number,
        token: kind_token.to_string(),
    })?;

    let timestamp = tokens
        .next()
        .and_then(Timestamp::new)
        .ok_or(ParseError::MissingField {
            line: line_number,
            field: "timestamp",
        })?;

    let count = match tokens.next() {
        None => 1,
        Some(token) => parse_count(token, line_number)?,
    };

    if let Some(extra) = tokens.next() {
        return Err(ParseError::TrailingInput {
            line: line_number,
            token: extra.to_string(),
        });
    }

    Ok(Some(LogRecord::new(
        source,
        destination,
        kind,
        timestamp,
        count,
    )))
}

/// Parse a single line, never failing.
///
/// Errors become [`ParseResult::Malformed`] so the caller can keep going.
pub fn parse_line_graceful(path: &Path, raw: &str, line_number: usize) -> ParseResult {
    match parse_line(raw, line_number) {
        Ok(Some(record)) => ParseResult::Valid(record),
        Ok(None) => ParseResult::Ignored,
        Err(error) => ParseResult::Malformed(MalformedLine::new(path, raw, error)),
    }
}

fn parse_node(raw: &str, line_number: usize) -> Result<NodeId, ParseError> {
    NodeId::parse(raw).map_err(|source| ParseError::InvalidNode {
        line: line_number,
        source,
    })
}

fn parse_count(token: &str, line_number: usize) -> Result<u64, ParseError> {
    let Some(digits) = token.strip_prefix(COUNT_PREFIX) else {
        return Err(ParseError::TrailingInput {
            line: line_number,
            token: token.to_string(),
        });
    };

    match digits.parse::<u64>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ParseError::InvalidCount {
            line: line_number,
            token: token.to_string(),
        }),
    }
}

// ===== ParseReport =====

/// Everything the parser found in one or more files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    records: Vec<LogRecord>,
    malformed: Vec<MalformedLine>,
    lines_read: usize,
    files: Vec<PathBuf>,
}

impl ParseReport {
    /// Valid records, in file order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Rejected lines, in file order.
    pub fn malformed(&self) -> &[MalformedLine] {
        &self.malformed
    }

    /// Lines examined, including blank, comment and malformed lines.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Files the report covers.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Append another file's results.
    pub fn merge(&mut self, other: ParseReport) {
        self.records.extend(other.records);
        self.malformed.extend(other.malformed);
        self.lines_read += other.lines_read;
        self.files.extend(other.files);
    }
}

/// Parse the full text of one log file.
///
/// See [`parse_bytes`].
pub fn parse_content(path: &Path, content: &str, max_lines: Option<usize>) -> ParseReport {
    parse_bytes(path, content.as_bytes(), max_lines)
}

/// Parse the raw bytes of one log file.
///
/// Lines end at `\n`, with an optional `\r` before it. Each line is decoded
/// on its own; one that is not UTF-8 becomes a
/// [`ParseError::InvalidEncoding`] malformed line.
///
/// When `max_lines` is set only the last `max_lines` lines are parsed;
/// line numbers still refer to positions in the whole file.
/// Malformed lines are logged at `warn` and collected in the report.
pub fn parse_bytes(path: &Path, bytes: &[u8], max_lines: Option<usize>) -> ParseReport {
    let lines = split_lines(bytes);
    let skip = max_lines.map_or(0, |max| lines.len().saturating_sub(max));

    let mut report = ParseReport {
        files: vec![path.to_path_buf()],
        ..ParseReport::default()
    };

    for (index, raw) in lines.iter().enumerate().skip(skip) {
        report.lines_read += 1;
        let line_number = index + 1;
        let result = match std::str::from_utf8(raw) {
            Ok(line) => parse_line_graceful(path, line, line_number),
            Err(_) => ParseResult::Malformed(MalformedLine::new(
                path,
                String::from_utf8_lossy(raw),
                ParseError::InvalidEncoding { line: line_number },
            )),
        };
        match result {
            ParseResult::Valid(record) => report.records.push(record),
            ParseResult::Ignored => {}
            ParseResult::Malformed(malformed) => {
                warn!(
                    path = %malformed.path().display(),
                    line = malformed.line_number(),
                    "Skipping malformed line: {}",
                    malformed.error()
                );
                report.malformed.push(malformed);
            }
        }
    }

    report
}

// Same boundaries as `str::lines`: no empty line after a final newline.
fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = bytes.split(|&byte| byte == b'\n').collect();
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
        .into_iter()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}
