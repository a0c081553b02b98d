//! Backend-independent figure of the failure graph.
//!
//! [`render`] is a pure function of the graph and the current
//! [`ViewState`]. Both the HTML report and the terminal UI draw whatever it
//! returns, so every filtering and encoding rule lives here.

use crate::graph_layout::{self, Bounds, LayoutOptions, Point, Positions};
use crate::model::{Aggregate, Metric, NodeId};

/// Heading of every figure.
pub const TITLE: &str = "Interactive Graph of Network Failures";
/// Shown instead of a graph when the logs contain no nodes.
pub const EMPTY_MESSAGE: &str = "No errors found in the input logs";

/// Narrowest edge, drawn for the lightest visible pair.
pub const MIN_EDGE_WIDTH: f64 = 0.4;
/// Extra width given to the heaviest visible pair.
pub const EDGE_WIDTH_RANGE: f64 = 3.0;

/// Aggregated statistics plus node placement, built once per run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphModel {
    aggregate: Aggregate,
    positions: Positions,
}

impl GraphModel {
    /// Lay out every node of `aggregate`.
    pub fn new(aggregate: Aggregate, layout: LayoutOptions) -> Self {
        let ids: Vec<NodeId> = aggregate.nodes().iter().map(|n| n.node.clone()).collect();
        let positions = graph_layout::layout(&ids, layout);
        Self {
            aggregate,
            positions,
        }
    }

    /// The statistics being drawn.
    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    /// Where each node sits.
    pub fn positions(&self) -> &Positions {
        &self.positions
    }
}

/// What the user is currently looking at.
///
/// Replaced wholesale by the dispatch functions in `state`; rendering only
/// ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Which failures colour nodes and weight edges.
    pub metric: Metric,
    /// Minimum edge weight (under `metric`) for an edge to be drawn.
    pub threshold: u64,
    /// Node whose connections are shown; `None` shows every node's.
    pub selected: Option<NodeId>,
    /// Node under the pointer.
    pub hovered: Option<NodeId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            metric: Metric::Combined,
            threshold: 1,
            selected: None,
            hovered: None,
        }
    }
}

impl ViewState {
    /// Same view under another metric.
    pub fn with_metric(self, metric: Metric) -> Self {
        Self { metric, ..self }
    }

    /// Same view with another minimum edge weight.
    pub fn with_threshold(self, threshold: u64) -> Self {
        Self { threshold, ..self }
    }

    /// Same view with another selection.
    pub fn with_selected(self, selected: Option<NodeId>) -> Self {
        Self { selected, ..self }
    }

    /// Same view with another hovered node.
    pub fn with_hovered(self, hovered: Option<NodeId>) -> Self {
        Self { hovered, ..self }
    }
}

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(
    /// Red.
    pub u8,
    /// Green.
    pub u8,
    /// Blue.
    pub u8,
);

impl Rgb {
    /// CSS form, e.g. `#fb6a4a`.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A node as drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureNode {
    /// Node identifier, also its label.
    pub id: NodeId,
    /// Layout position.
    pub position: Point,
    /// Count under the current metric.
    pub value: u64,
    /// `value / max value`, in `0.0..=1.0`.
    pub intensity: f64,
    /// Fill colour on the Reds scale.
    pub color: Rgb,
    /// Text shown when the pointer is over the node.
    pub hover: String,
    /// The node is the current selection.
    pub selected: bool,
    /// The pointer is over the node.
    pub hovered: bool,
}

/// A visible edge.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureEdge {
    /// Lower endpoint.
    pub a: NodeId,
    /// Higher endpoint.
    pub b: NodeId,
    /// Position of `a`.
    pub from: Point,
    /// Position of `b`.
    pub to: Point,
    /// Failures between the pair under the current metric.
    pub weight: u64,
    /// Line width, see [`edge_width`].
    pub width: f64,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Always [`TITLE`].
    pub title: String,
    /// `Selected Node: ...` line.
    pub subtitle: String,
    /// Caption of the colour bar.
    pub colorbar_label: String,
    /// Metric the figure was rendered under.
    pub metric: Metric,
    /// Every node, in identifier order.
    pub nodes: Vec<FigureNode>,
    /// Edges that pass the threshold and selection filters.
    pub edges: Vec<FigureEdge>,
    /// Largest node value under the metric; the top of the colour bar.
    pub max_value: u64,
    /// Padded box around every node position.
    pub bounds: Bounds,
    /// Informational message shown instead of a graph.
    pub message: Option<String>,
}

impl Figure {
    /// No nodes to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Closest node to `point` within `radius`.
    pub fn node_at(&self, point: Point, radius: f64) -> Option<&FigureNode> {
        let limit = radius * radius;
        self.nodes
            .iter()
            .map(|node| (node.position.distance_squared(point), node))
            .filter(|(d, _)| *d <= limit)
            .min_by(|(x, _), (y, _)| x.total_cmp(y))
            .map(|(_, node)| node)
    }

    /// The drawn node with this identifier.
    pub fn node(&self, id: &NodeId) -> Option<&FigureNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}

/// Build the figure for `state`.
pub fn render(model: &GraphModel, state: &ViewState) -> Figure {
    let aggregate = model.aggregate();
    let metric = state.metric;
    let subtitle = match &state.selected {
        Some(node) => format!("Selected Node: {node}"),
        None => "Selected Node: All Nodes".to_string(),
    };
    let colorbar_label = format!("Num of Failures {}", metric.label());

    if aggregate.is_empty() {
        return Figure {
            title: TITLE.to_string(),
            subtitle,
            colorbar_label,
            metric,
            nodes: Vec::new(),
            edges: Vec::new(),
            max_value: 0,
            bounds: Bounds::of(std::iter::empty()),
            message: Some(EMPTY_MESSAGE.to_string()),
        };
    }

    let max_value = aggregate.max_node_value(metric);
    let nodes: Vec<FigureNode> = aggregate
        .nodes()
        .iter()
        .map(|stats| {
            let value = stats.value(metric);
            let intensity = if max_value == 0 {
                0.0
            } else {
                value as f64 / max_value as f64
            };
            FigureNode {
                id: stats.node.clone(),
                position: model.positions().get(&stats.node).unwrap_or_default(),
                value,
                intensity,
                color: reds(intensity),
                hover: hover_text(aggregate, &stats.node, state.selected.as_ref()),
                selected: state.selected.as_ref() == Some(&stats.node),
                hovered: state.hovered.as_ref() == Some(&stats.node),
            }
        })
        .collect();

    let visible: Vec<_> = aggregate
        .edges()
        .iter()
        .filter(|edge| {
            let weight = edge.weight(metric);
            weight > 0 && weight >= state.threshold
        })
        .filter(|edge| state.selected.as_ref().is_none_or(|sel| edge.touches(sel)))
        .collect();

    let max_weight = visible
        .iter()
        .map(|edge| edge.weight(metric))
        .max()
        .unwrap_or(0);

    let edges = visible
        .into_iter()
        .map(|edge| {
            let weight = edge.weight(metric);
            FigureEdge {
                a: edge.a.clone(),
                b: edge.b.clone(),
                from: model.positions().get(&edge.a).unwrap_or_default(),
                to: model.positions().get(&edge.b).unwrap_or_default(),
                weight,
                width: edge_width(weight, max_weight),
            }
        })
        .collect();

    let bounds = Bounds::of(nodes.iter().map(|n| n.position)).padded(0.08);

    Figure {
        title: TITLE.to_string(),
        subtitle,
        colorbar_label,
        metric,
        nodes,
        edges,
        max_value,
        bounds,
        message: None,
    }
}

/// `0.4 + 3.0 * weight / max_weight`.
pub fn edge_width(weight: u64, max_weight: u64) -> f64 {
    if max_weight == 0 {
        return MIN_EDGE_WIDTH;
    }
    MIN_EDGE_WIDTH + EDGE_WIDTH_RANGE * weight as f64 / max_weight as f64
}

/// Hover text for `node`, with the pair breakdown against `selected` when
/// they share failures.
pub fn hover_text(aggregate: &Aggregate, node: &NodeId, selected: Option<&NodeId>) -> String {
    let (send, receive, total) = aggregate
        .node(node)
        .map_or((0, 0, 0), |stats| (stats.send, stats.receive, stats.total()));
    let mut text = format!("{node} <-> All Nodes: Total={total} Send={send} Receive={receive}");

    if let Some(sel) = selected.filter(|sel| *sel != node) {
        if let Some(edge) = aggregate.edge_between(node, sel).filter(|e| e.count() > 0) {
            text.push_str(&format!(
                "\n{node} <-> {sel}: Total={}, Send={}, Receive={}",
                edge.count(),
                edge.send,
                edge.receive
            ));
        }
    }

    text
}

// Plotly's "Reds" stops.
const REDS: [(f64, Rgb); 9] = [
    (0.0, Rgb(255, 245, 240)),
    (0.125, Rgb(254, 224, 210)),
    (0.25, Rgb(252, 187, 161)),
    (0.375, Rgb(252, 146, 114)),
    (0.5, Rgb(251, 106, 74)),
    (0.625, Rgb(239, 59, 44)),
    (0.75, Rgb(203, 24, 29)),
    (0.875, Rgb(165, 15, 21)),
    (1.0, Rgb(103, 0, 13)),
];

/// Colour for `t` in `0.0..=1.0` on the Reds scale (light to dark).
pub fn reds(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    for pair in REDS.windows(2) {
        let (lo, lo_color) = pair[0];
        let (hi, hi_color) = pair[1];
        if t <= hi {
            let f = (t - lo) / (hi - lo);
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
            return Rgb(
                mix(lo_color.0, hi_color.0),
                mix(lo_color.1, hi_color.1),
                mix(lo_color.2, hi_color.2),
            );
        }
    }
    REDS[REDS.len() - 1].1
}
