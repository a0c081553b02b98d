//! Pure core of a run: parsed logs in, statistics and the starting view out.
//!
//! Only [`analyze`] touches the filesystem; everything else here is testable
//! without I/O.

use crate::figure::ViewState;
use crate::model::{Aggregate, InputError, Metric, NodeId, Summary};
use crate::parser::ParseReport;
use crate::source;
use crate::state::view_handler::max_threshold;
use std::path::PathBuf;
use tracing::{info, warn};

/// Everything derived from one set of input files.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Records and malformed lines from every file.
    pub report: ParseReport,
    /// Per-node and per-pair statistics.
    pub aggregate: Aggregate,
    /// Headline totals.
    pub summary: Summary,
}

impl Analysis {
    /// Aggregate an already-parsed report.
    pub fn from_report(report: ParseReport) -> Self {
        let aggregate = Aggregate::from_records(report.records());
        let summary = Summary::new(
            report.files().len(),
            report.lines_read(),
            report.malformed().len(),
            report.records(),
            &aggregate,
        );

        info!(
            nodes = aggregate.nodes().len(),
            edges = aggregate.edges().len(),
            total = summary.total_errors(),
            "Aggregated failures"
        );

        Self {
            report,
            aggregate,
            summary,
        }
    }
}

/// Read, parse and aggregate the given log files.
///
/// # Errors
///
/// Returns `InputError` if any file is missing or unreadable. Malformed
/// lines are never an error; they are counted in the summary.
pub fn analyze(paths: &[PathBuf], max_lines: Option<usize>) -> Result<Analysis, InputError> {
    let report = source::read_logs(paths, max_lines)?;
    Ok(Analysis::from_report(report))
}

/// Starting view for the given options.
///
/// The threshold is clamped to `1..=heaviest edge`. A node that does not
/// appear in the logs is ignored with a warning rather than shown as an
/// empty selection.
pub fn initial_view(
    aggregate: &Aggregate,
    metric: Metric,
    threshold: u64,
    node: Option<NodeId>,
) -> ViewState {
    let threshold = threshold.clamp(1, max_threshold(aggregate, metric));
    let selected = node.filter(|id| {
        let known = aggregate.node(id).is_some();
        if !known {
            warn!(node = %id, "Requested node not found in logs; showing all nodes");
        }
        known
    });

    ViewState::default()
        .with_metric(metric)
        .with_threshold(threshold)
        .with_selected(selected)
}
