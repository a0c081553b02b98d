//! Error types for netfail.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions up to [`AppError`], which the binary reports.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping every fatal failure
//!   - [`InputError`] - Log files missing or unreadable (fatal)
//!   - [`OutputError`] - HTML report could not be written (fatal)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file unreadable or invalid
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failed
//!   - [`TuiError`](crate::view::TuiError) - Terminal failures in interactive mode
//! - [`ParseError`] - One log line did not parse (never fatal)
//!
//! # Recovery Strategy
//!
//! Parse errors are **non-fatal**: the line is wrapped in a
//! [`MalformedLine`](crate::model::MalformedLine), logged at `warn`, counted, and
//! skipped. Everything else aborts the run with a message on stderr.

use crate::model::identifiers::InvalidNodeId;
use crate::model::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read one of the input log files.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Failed to write the HTML report.
    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),

    /// Configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal failure while running the interactive view.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors encountered when reading log files.
///
/// All variants carry the offending path so the message points the user at
/// the right file when several logs are given.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified log file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use netfail::model::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.log")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.log"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was given.
        path: PathBuf,
    },

    /// The path exists but is not a regular file (e.g. a directory).
    #[error("Not a regular file: {path}")]
    NotAFile {
        /// The path that was given.
        path: PathBuf,
    },

    /// I/O failure while reading the file, such as missing permissions or a disk error.
    ///
    /// Bytes that are not UTF-8 are not an I/O failure; they surface per line
    /// as [`ParseError::InvalidEncoding`].
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors encountered when writing the static report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The HTML file or its parent directory could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Why a single log line was rejected.
///
/// Every variant carries the 1-based line number so warnings can point at
/// the exact line in the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line does not have the `<src>-><dst> <kind> <timestamp>` shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use netfail::model::ParseError;
    ///
    /// let err = ParseError::UnrecognizedLine { line: 7 };
    /// assert!(err.to_string().contains("line 7"));
    /// ```
    #[error("Unrecognized line format at line {line}")]
    UnrecognizedLine {
        /// 1-based line number.
        line: usize,
    },

    /// A required field is absent, e.g. the timestamp.
    #[error("Missing required field '{field}' at line {line}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A node identifier is neither an IPv4 address nor a valid hostname.
    #[error("Invalid node identifier at line {line}: {source}")]
    InvalidNode {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the identifier.
        #[source]
        source: InvalidNodeId,
    },

    /// The error-kind token is not `send_error` or `receive_error`.
    #[error("Unknown error kind '{token}' at line {line}")]
    UnknownErrorKind {
        /// 1-based line number.
        line: usize,
        /// The token that was found.
        token: String,
    },

    /// The repeat count is not of the form `x<N>` with N ≥ 1.
    #[error("Invalid repeat count '{token}' at line {line}")]
    InvalidCount {
        /// 1-based line number.
        line: usize,
        /// The token that was found.
        token: String,
    },

    /// Source and destination are the same node.
    #[error("Source and destination are both {node} at line {line}")]
    SelfLoop {
        /// 1-based line number.
        line: usize,
        /// The repeated node.
        node: NodeId,
    },

    /// Extra tokens after the last recognized field.
    #[error("Unexpected trailing input '{token}' at line {line}")]
    TrailingInput {
        /// 1-based line number.
        line: usize,
        /// First unexpected token.
        token: String,
    },

    /// The line is not valid UTF-8.
    #[error("Line {line} is not valid UTF-8")]
    InvalidEncoding {
        /// 1-based line number.
        line: usize,
    },
}

impl ParseError {
    /// The 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnrecognizedLine { line }
            | ParseError::MissingField { line, .. }
            | ParseError::InvalidNode { line, .. }
            | ParseError::UnknownErrorKind { line, .. }
            | ParseError::InvalidCount { line, .. }
            | ParseError::SelfLoop { line, .. }
            | ParseError::TrailingInput { line, .. }
            | ParseError::InvalidEncoding { line } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn input_error_mentions_path() {
        let err = InputError::Read {
            path: PathBuf::from("/var/log/net.log"),
            source: std::io::Error::other("denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/var/log/net.log"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn app_error_wraps_input_error() {
        let err: AppError = InputError::FileNotFound {
            path: PathBuf::from("x.log"),
        }
        .into();
        assert!(matches!(err, AppError::Input(_)));
        assert!(err.to_string().contains("x.log"));
    }

    #[test]
    fn parse_error_line_accessor_covers_variants() {
        let errors = [
            ParseError::UnrecognizedLine { line: 1 },
            ParseError::MissingField {
                line: 2,
                field: "timestamp",
            },
            ParseError::InvalidNode {
                line: 3,
                source: InvalidNodeId::Empty,
            },
            ParseError::UnknownErrorKind {
                line: 4,
                token: "oops".into(),
            },
            ParseError::InvalidCount {
                line: 5,
                token: "x0".into(),
            },
            ParseError::SelfLoop {
                line: 6,
                node: NodeId::parse("a").unwrap(),
            },
            ParseError::TrailingInput {
                line: 7,
                token: "extra".into(),
            },
            ParseError::InvalidEncoding { line: 8 },
        ];

        let lines: Vec<usize> = errors.iter().map(ParseError::line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn invalid_node_exposes_source() {
        let err = ParseError::InvalidNode {
            line: 9,
            source: InvalidNodeId::BadAddress("1.2.3.999".into()),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("line 9"));
    }
}
