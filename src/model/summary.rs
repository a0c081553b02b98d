//! Run-level totals shown before the ranking tables.

use crate::model::{Aggregate, LogRecord, Metric};
use chrono::{DateTime, Utc};

/// Headline numbers for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    /// Input files parsed.
    pub files_read: usize,
    /// Lines read across all files, after any `max_lines` window.
    pub lines_read: usize,
    /// Valid records.
    pub records: usize,
    /// Lines that failed to parse.
    pub malformed_lines: usize,
    /// Send failures, weighted by count.
    pub send_errors: u64,
    /// Receive failures, weighted by count.
    pub receive_errors: u64,
    /// Distinct nodes seen as source or destination.
    pub unique_nodes: usize,
    /// Nodes with at least one send failure.
    pub nodes_with_send_errors: usize,
    /// Nodes with at least one receive failure.
    pub nodes_with_receive_errors: usize,
    /// Earliest RFC 3339 timestamp among the records, if any parsed.
    pub first_seen: Option<DateTime<Utc>>,
    /// Latest RFC 3339 timestamp among the records, if any parsed.
    pub last_seen: Option<DateTime<Utc>>,
}

impl Summary {
    /// Collect totals from the parsed records and their aggregate.
    pub fn new(
        files_read: usize,
        lines_read: usize,
        malformed_lines: usize,
        records: &[LogRecord],
        aggregate: &Aggregate,
    ) -> Self {
        let mut first_seen: Option<DateTime<Utc>> = None;
        let mut last_seen: Option<DateTime<Utc>> = None;
        for instant in records.iter().filter_map(|r| r.timestamp().parsed()) {
            first_seen = Some(first_seen.map_or(instant, |t| t.min(instant)));
            last_seen = Some(last_seen.map_or(instant, |t| t.max(instant)));
        }

        let nodes = aggregate.nodes();
        Self {
            files_read,
            lines_read,
            records: records.len(),
            malformed_lines,
            send_errors: aggregate.total(Metric::Send),
            receive_errors: aggregate.total(Metric::Receive),
            unique_nodes: nodes.len(),
            nodes_with_send_errors: nodes.iter().filter(|n| n.send > 0).count(),
            nodes_with_receive_errors: nodes.iter().filter(|n| n.receive > 0).count(),
            first_seen,
            last_seen,
        }
    }

    /// Send and receive failures together, saturating at `u64::MAX`.
    pub fn total_errors(&self) -> u64 {
        self.send_errors.saturating_add(self.receive_errors)
    }
}
