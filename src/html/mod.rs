//! Static HTML report.
//!
//! One self-contained file: an inline SVG of the figure (hover tooltips come
//! from SVG `<title>` elements), the colour bar, run totals, the ranked node
//! table and the cumulative failure chart. No scripts, no external assets.

use crate::figure::{reds, Figure};
use crate::model::{OutputError, RankedList, Summary};
use std::fmt::Write;
use std::fs;
use std::path::Path;

const GRAPH_WIDTH: f64 = 900.0;
const GRAPH_HEIGHT: f64 = 700.0;
const GRAPH_MARGIN: f64 = 30.0;
const NODE_RADIUS: f64 = 9.0;
// SVG user units per figure width unit.
const EDGE_SCALE: f64 = 2.0;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 260.0;
const CHART_MARGIN: f64 = 40.0;

/// Inputs for one report.
#[derive(Debug, Clone, Copy)]
pub struct ReportData<'a> {
    /// Graph to embed as SVG.
    pub figure: &'a Figure,
    /// Headline totals.
    pub summary: &'a Summary,
    /// Rows of the top-N table.
    pub top: &'a RankedList,
    /// Total failures the ranked shares are relative to.
    pub total: u64,
    /// Cumulative failure share of the worst k nodes, k = 1..
    pub cumulative: &'a [f64],
}

/// Render and write the report to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `OutputError::Write` if the directory or file cannot be written.
pub fn write_report(path: &Path, data: &ReportData<'_>) -> Result<(), OutputError> {
    let html = render_report(data);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| OutputError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, html).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Wrote network error report");
    Ok(())
}

/// The complete HTML document.
pub fn render_report(data: &ReportData<'_>) -> String {
    let figure = data.figure;
    let message = figure
        .message
        .as_deref()
        .map(|m| format!("<p class=\"message\">{}</p>", escape(m)))
        .unwrap_or_default();

    HTML_TEMPLATE
        .replace("__TITLE__", &escape(&figure.title))
        .replace("__SUBTITLE__", &escape(&figure.subtitle))
        .replace("__MESSAGE__", &message)
        .replace("__GRAPH__", &graph_svg(figure))
        .replace("__COLORBAR__", &colorbar_svg(figure))
        .replace("__SUMMARY__", &summary_table(data.summary))
        .replace("__TOP__", &top_table(data.top, data.total))
        .replace("__CUMULATIVE__", &cumulative_svg(data.cumulative))
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn graph_svg(figure: &Figure) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg class=\"graph\" viewBox=\"0 0 {GRAPH_WIDTH} {GRAPH_HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    if figure.is_empty() {
        svg.push_str("</svg>");
        return svg;
    }

    let bounds = figure.bounds;
    let sx = (GRAPH_WIDTH - 2.0 * GRAPH_MARGIN) / bounds.width();
    let sy = (GRAPH_HEIGHT - 2.0 * GRAPH_MARGIN) / bounds.height();
    // SVG y grows downwards
    let project = |x: f64, y: f64| {
        (
            GRAPH_MARGIN + (x - bounds.min.x) * sx,
            GRAPH_HEIGHT - GRAPH_MARGIN - (y - bounds.min.y) * sy,
        )
    };

    svg.push_str("<g class=\"edges\">");
    for edge in &figure.edges {
        let (x1, y1) = project(edge.from.x, edge.from.y);
        let (x2, y2) = project(edge.to.x, edge.to.y);
        let _ = write!(
            svg,
            "<line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke-width=\"{:.2}\"><title>{} &lt;-&gt; {}: {}</title></line>",
            edge.width * EDGE_SCALE,
            escape(&edge.a.to_string()),
            escape(&edge.b.to_string()),
            edge.weight
        );
    }
    svg.push_str("</g><g class=\"nodes\">");
    for node in &figure.nodes {
        let (cx, cy) = project(node.position.x, node.position.y);
        let class = if node.selected { "node selected" } else { "node" };
        let _ = write!(
            svg,
            "<circle class=\"{class}\" cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{NODE_RADIUS}\" fill=\"{}\"><title>{}</title></circle>",
            node.color.hex(),
            escape(&node.hover)
        );
    }
    svg.push_str("</g></svg>");
    svg
}

fn colorbar_svg(figure: &Figure) -> String {
    let mut svg = String::new();
    svg.push_str(
        "<svg class=\"colorbar\" viewBox=\"0 0 120 300\" xmlns=\"http://www.w3.org/2000/svg\">",
    );
    svg.push_str("<defs><linearGradient id=\"reds\" x1=\"0\" y1=\"1\" x2=\"0\" y2=\"0\">");
    for i in 0..=8 {
        let t = f64::from(i) / 8.0;
        let _ = write!(
            svg,
            "<stop offset=\"{:.3}\" stop-color=\"{}\"/>",
            t,
            reds(t).hex()
        );
    }
    svg.push_str("</linearGradient></defs>");
    let _ = write!(
        svg,
        "<rect x=\"10\" y=\"20\" width=\"24\" height=\"260\" fill=\"url(#reds)\"/>\
         <text x=\"40\" y=\"30\">{}</text><text x=\"40\" y=\"280\">0</text>\
         <text x=\"110\" y=\"150\" transform=\"rotate(90 110 150)\" text-anchor=\"middle\">{}</text></svg>",
        figure.max_value,
        escape(&figure.colorbar_label)
    );
    svg
}

fn summary_table(summary: &Summary) -> String {
    let mut rows = vec![
        ("Files read", summary.files_read.to_string()),
        ("Lines read", summary.lines_read.to_string()),
        ("Records parsed", summary.records.to_string()),
        ("Malformed lines", summary.malformed_lines.to_string()),
        ("Total errors", summary.total_errors().to_string()),
        ("Send errors", summary.send_errors.to_string()),
        ("Receive errors", summary.receive_errors.to_string()),
        ("Unique nodes", summary.unique_nodes.to_string()),
        ("Nodes with send errors", summary.nodes_with_send_errors.to_string()),
        (
            "Nodes with receive errors",
            summary.nodes_with_receive_errors.to_string(),
        ),
    ];
    if let (Some(first), Some(last)) = (summary.first_seen, summary.last_seen) {
        rows.push(("First failure", first.to_rfc3339()));
        rows.push(("Last failure", last.to_rfc3339()));
    }

    let mut html = String::from("<table class=\"summary\">");
    for (label, value) in rows {
        let _ = write!(html, "<tr><th>{label}</th><td>{}</td></tr>", escape(&value));
    }
    html.push_str("</table>");
    html
}

fn top_table(top: &RankedList, total: u64) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<h2>Top {} nodes by {} failures</h2>",
        top.len(),
        escape(top.metric().label())
    );
    if top.is_empty() {
        html.push_str("<p>No nodes.</p>");
        return html;
    }

    html.push_str(
        "<table class=\"ranking\"><thead><tr><th>Rank</th><th>Node</th><th>Failures</th><th>Share</th></tr></thead><tbody>",
    );
    for (i, entry) in top.iter().enumerate() {
        let share = if total == 0 {
            0.0
        } else {
            entry.count as f64 / total as f64 * 100.0
        };
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{share:.1}%</td></tr>",
            i + 1,
            escape(&entry.node.to_string()),
            entry.count
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn cumulative_svg(cumulative: &[f64]) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg class=\"cumulative\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    let left = CHART_MARGIN;
    let right = CHART_WIDTH - CHART_MARGIN / 2.0;
    let top = CHART_MARGIN / 2.0;
    let bottom = CHART_HEIGHT - CHART_MARGIN;
    let _ = write!(
        svg,
        "<line class=\"axis\" x1=\"{left}\" y1=\"{bottom}\" x2=\"{right}\" y2=\"{bottom}\"/>\
         <line class=\"axis\" x1=\"{left}\" y1=\"{top}\" x2=\"{left}\" y2=\"{bottom}\"/>\
         <text x=\"{}\" y=\"{}\" text-anchor=\"end\">100%</text>\
         <text x=\"{}\" y=\"{bottom}\" text-anchor=\"end\">0%</text>\
         <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">Number of worst nodes</text>",
        left - 4.0,
        top + 4.0,
        left - 4.0,
        (left + right) / 2.0,
        CHART_HEIGHT - 8.0
    );

    if !cumulative.is_empty() {
        let step = if cumulative.len() > 1 {
            (right - left) / (cumulative.len() - 1) as f64
        } else {
            0.0
        };
        let points: Vec<String> = cumulative
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let x = left + step * i as f64;
                let y = bottom - (bottom - top) * share / 100.0;
                format!("{x:.1},{y:.1}")
            })
            .collect();
        let _ = write!(
            svg,
            "<polyline class=\"share\" points=\"{}\"/>",
            points.join(" ")
        );
    }
    svg.push_str("</svg>");
    svg
}

const HTML_TEMPLATE: &str = r###"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<style>
body { font-family: system-ui, sans-serif; margin: 24px; color: #222; }
h1 { margin-bottom: 0; }
h1 small { display: block; font-size: 60%; font-weight: normal; color: #555; }
.figure { display: flex; align-items: flex-start; gap: 12px; }
svg.graph { width: 900px; max-width: 100%; border: 1px solid #ddd; background: #fff; }
svg.colorbar { width: 120px; height: 300px; font-size: 12px; }
.edges line { stroke: #888; stroke-opacity: 0.7; }
.nodes circle { stroke: #555; stroke-width: 1; }
.nodes circle.selected { stroke: #000; stroke-width: 3; }
.message { font-style: italic; color: #a00; }
table { border-collapse: collapse; margin: 12px 0; }
th, td { padding: 3px 10px; border-bottom: 1px solid #eee; text-align: left; }
table.ranking td:nth-child(n+3) { text-align: right; }
svg.cumulative { width: 600px; max-width: 100%; font-size: 12px; }
svg.cumulative .axis { stroke: #444; }
svg.cumulative .share { fill: none; stroke: #cb181d; stroke-width: 2; }
</style>
</head>
<body>
<h1>__TITLE__<small>__SUBTITLE__</small></h1>
__MESSAGE__
<div class="figure">
__GRAPH__
__COLORBAR__
</div>
<h2>Summary</h2>
__SUMMARY__
__TOP__
<h2>Cumulative share of failures</h2>
__CUMULATIVE__
</body>
</html>
"###;
