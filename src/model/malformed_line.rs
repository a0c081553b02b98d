//! Lines that could not be parsed into a LogRecord.

use crate::model::ParseError;
use std::path::{Path, PathBuf};

/// A log line that was dropped because it did not parse.
///
/// Kept so the run can report how many lines were skipped and why,
/// without aborting on the first bad line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    path: PathBuf,
    raw_line: String,
    error: ParseError,
}

impl MalformedLine {
    /// Create a new malformed line record.
    ///
    /// # Arguments
    ///
    /// * `path` - File the line came from
    /// * `raw_line` - The raw line content that failed to parse
    /// * `error` - Why parsing failed (carries the 1-indexed line number)
    pub fn new(path: impl Into<PathBuf>, raw_line: impl Into<String>, error: ParseError) -> Self {
        Self {
            path: path.into(),
            raw_line: raw_line.into(),
            error,
        }
    }

    /// File the line came from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line number within the file (1-indexed).
    pub fn line_number(&self) -> usize {
        self.error.line()
    }

    /// The line as read, lossily decoded if it was not UTF-8.
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Why the line was rejected.
    pub fn error(&self) -> &ParseError {
        &self.error
    }
}
