//! File-based log source.
//!
//! Reads a whole log file once; there is no tailing.

use crate::model::error::InputError;
use crate::parser::{self, ParseReport};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A validated log file path.
///
/// Construction checks the path up front so missing files are reported
/// before any parsing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a FileSource for the given path.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::NotAFile` if the path is a directory or similar.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_file() {
            return Err(InputError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The validated path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Read` if the file cannot be read. Lines that are
    /// not UTF-8 are reported as malformed instead.
    pub fn load(&self, max_lines: Option<usize>) -> Result<ParseReport, InputError> {
        let bytes = std::fs::read(&self.path).map_err(|source| InputError::Read {
            path: self.path.clone(),
            source,
        })?;

        let report = parser::parse_bytes(&self.path, &bytes, max_lines);
        debug!(
            path = %self.path.display(),
            records = report.records().len(),
            malformed = report.malformed().len(),
            "Parsed log file"
        );

        Ok(report)
    }
}
