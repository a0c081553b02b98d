//! Log input sources.
//!
//! Every input file is validated before any of them is read, so a typo in
//! the last path fails the run immediately instead of after parsing the rest.

use crate::model::error::InputError;
use crate::parser::ParseReport;
use std::path::PathBuf;
use tracing::info;

pub mod file;

pub use file::FileSource;

/// Read and parse every log file, in the order given.
///
/// # Errors
///
/// Returns the first `InputError` encountered; missing or unreadable input
/// is fatal.
pub fn read_logs(paths: &[PathBuf], max_lines: Option<usize>) -> Result<ParseReport, InputError> {
    let sources = paths
        .iter()
        .map(FileSource::new)
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = ParseReport::default();
    for source in &sources {
        report.merge(source.load(max_lines)?);
    }

    info!(
        files = sources.len(),
        lines = report.lines_read(),
        records = report.records().len(),
        malformed = report.malformed().len(),
        "Finished reading logs"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_logs_merges_multiple_files() {
        let dir = std::env::temp_dir();
        let first = dir.join("netfail_read_logs_first.log");
        let second = dir.join("netfail_read_logs_second.log");
        fs::write(&first, "a->b send_error t1\n").unwrap();
        fs::write(&second, "b->c receive_error t2\nbroken\n").unwrap();

        let report = read_logs(&[first.clone(), second.clone()], None).unwrap();

        let _ = fs::remove_file(&first);
        let _ = fs::remove_file(&second);

        assert_eq!(report.records().len(), 2);
        assert_eq!(report.malformed().len(), 1);
        assert_eq!(report.files().len(), 2);
    }

    #[test]
    fn read_logs_fails_fast_on_missing_file() {
        let dir = std::env::temp_dir();
        let present = dir.join("netfail_read_logs_present.log");
        let missing = dir.join("netfail_read_logs_missing.log");
        fs::write(&present, "a->b send_error t1\n").unwrap();
        let _ = fs::remove_file(&missing);

        let result = read_logs(&[present.clone(), missing.clone()], None);

        let _ = fs::remove_file(&present);

        match result {
            Err(InputError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn read_logs_with_no_paths_is_empty() {
        let report = read_logs(&[], None).unwrap();
        assert!(report.records().is_empty());
        assert_eq!(report.lines_read(), 0);
    }
}
