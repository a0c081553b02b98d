//! Plain-text run report for stdout.

use crate::model::{MalformedLine, RankedList, Summary};
use std::fmt::Write;

const LABEL_WIDTH: usize = 27;

/// Malformed lines listed individually before the rest are only counted.
pub const MALFORMED_PREVIEW: usize = 5;

/// Headline totals, one `label value` pair per line.
pub fn summary_text(summary: &Summary) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("Files read", summary.files_read.to_string()),
        ("Lines read", summary.lines_read.to_string()),
        ("Records parsed", summary.records.to_string()),
        ("Malformed lines", summary.malformed_lines.to_string()),
        ("Total errors", summary.total_errors().to_string()),
        ("Send errors", summary.send_errors.to_string()),
        ("Receive errors", summary.receive_errors.to_string()),
        ("Unique nodes", summary.unique_nodes.to_string()),
        (
            "Nodes with send errors",
            summary.nodes_with_send_errors.to_string(),
        ),
        (
            "Nodes with receive errors",
            summary.nodes_with_receive_errors.to_string(),
        ),
    ];
    if let (Some(first), Some(last)) = (summary.first_seen, summary.last_seen) {
        rows.push(("First failure", first.to_rfc3339()));
        rows.push(("Last failure", last.to_rfc3339()));
    }

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
    }
    out
}

/// Ranked node table with each node's share of all failures.
///
/// `total` is the failure count the shares are relative to.
pub fn ranking_text(ranked: &RankedList, total: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Top {} nodes by {} failures",
        ranked.len(),
        ranked.metric().label()
    );
    if ranked.is_empty() {
        out.push_str("(no nodes)\n");
        return out;
    }

    let width = ranked
        .iter()
        .map(|entry| entry.node.to_string().len())
        .max()
        .unwrap_or(0)
        .max("Node".len());

    let _ = writeln!(out, "{:>4}  {:<width$}  {:>8}  {:>6}", "Rank", "Node", "Failures", "Share");
    for (i, entry) in ranked.iter().enumerate() {
        let share = if total == 0 {
            0.0
        } else {
            entry.count as f64 / total as f64 * 100.0
        };
        let name = entry.node.to_string();
        let _ = writeln!(
            out,
            "{:>4}  {name:<width$}  {:>8}  {:>5.1}%",
            i + 1,
            entry.count,
            share
        );
    }
    out
}

/// Count of skipped lines with the first few shown by location and reason.
pub fn malformed_text(malformed: &[MalformedLine]) -> String {
    let mut out = String::new();
    if malformed.is_empty() {
        return out;
    }

    let _ = writeln!(out, "Skipped {} malformed line(s):", malformed.len());
    for line in malformed.iter().take(MALFORMED_PREVIEW) {
        let _ = writeln!(
            out,
            "  {}:{}: {}",
            line.path().display(),
            line.line_number(),
            line.error()
        );
    }
    if malformed.len() > MALFORMED_PREVIEW {
        let _ = writeln!(out, "  ... and {} more", malformed.len() - MALFORMED_PREVIEW);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Aggregate, ErrorKind, LogRecord, Metric, NodeId, ParseError, Timestamp};
    use std::path::Path;

    fn node(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    fn scenario() -> (Vec<LogRecord>, Aggregate) {
        let rec = |src: &str, dst: &str, kind, ts: &str| {
            LogRecord::new(node(src), node(dst), kind, Timestamp::new(ts).unwrap(), 1)
        };
        let records = vec![
            rec("A", "B", ErrorKind::Send, "2021-03-01T10:00:00Z"),
            rec("B", "A", ErrorKind::Receive, "2021-03-01T10:05:00Z"),
            rec("A", "B", ErrorKind::Send, "2021-03-01T10:10:00Z"),
        ];
        let aggregate = Aggregate::from_records(&records);
        (records, aggregate)
    }

    #[test]
    fn summary_text_for_scenario() {
        let (records, aggregate) = scenario();
        let summary = Summary::new(1, 4, 1, &records, &aggregate);

        insta::assert_snapshot!(summary_text(&summary), @r###"
        Files read                 1
        Lines read                 4
        Records parsed             3
        Malformed lines            1
        Total errors               3
        Send errors                2
        Receive errors             1
        Unique nodes               2
        Nodes with send errors     1
        Nodes with receive errors  1
        First failure              2021-03-01T10:00:00+00:00
        Last failure               2021-03-01T10:10:00+00:00
        "###);
    }

    #[test]
    fn ranking_text_for_scenario() {
        let (_, aggregate) = scenario();
        let ranked = aggregate.top_ranked(25);

        insta::assert_snapshot!(ranking_text(&ranked, aggregate.total(Metric::Combined)), @r###"
        Top 2 nodes by Send+Receive failures
        Rank  Node  Failures   Share
           1  A            3  100.0%
           2  B            0    0.0%
        "###);
    }

    #[test]
    fn ranking_text_handles_no_nodes() {
        let ranked = Aggregate::default().top_ranked(25);
        assert_eq!(
            ranking_text(&ranked, 0),
            "Top 0 nodes by Send+Receive failures\n(no nodes)\n"
        );
    }

    #[test]
    fn malformed_text_truncates_long_lists() {
        let lines: Vec<MalformedLine> = (1..=7)
            .map(|i| {
                MalformedLine::new(
                    Path::new("net.log"),
                    "garbage",
                    ParseError::UnrecognizedLine { line: i },
                )
            })
            .collect();

        let text = malformed_text(&lines);

        assert!(text.starts_with("Skipped 7 malformed line(s):\n"));
        assert!(text.contains("  net.log:1: Unrecognized line format at line 1\n"));
        assert!(!text.contains("net.log:6:"));
        assert!(text.ends_with("  ... and 2 more\n"));
    }

    #[test]
    fn malformed_text_is_empty_without_malformed_lines() {
        assert_eq!(malformed_text(&[]), "");
    }
}
