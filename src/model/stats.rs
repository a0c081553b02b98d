//! Per-node and per-pair failure statistics.
//!
//! [`Aggregate`] is built in one pass over the parsed records and never
//! updated afterwards; every view (ranking, figure, summary) reads from it.

use crate::model::{ErrorKind, LogRecord, Metric, NodeId};
use std::collections::BTreeMap;

/// Default length of the ranked server list.
pub const DEFAULT_TOP_N: usize = 25;

// ===== NodeStats =====

/// Failure counts attributed to one node.
///
/// # Invariants
///
/// - `total() == send + receive`, saturating at `u64::MAX`; the total is
///   derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStats {
    /// The node the counts belong to.
    pub node: NodeId,
    /// Send failures reported by this node as the source.
    pub send: u64,
    /// Receive failures reported by this node as the destination.
    pub receive: u64,
}

impl NodeStats {
    /// A node with no failures attributed to it yet.
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            send: 0,
            receive: 0,
        }
    }

    /// Send and receive failures together.
    pub fn total(&self) -> u64 {
        self.send.saturating_add(self.receive)
    }

    /// Count under the given metric.
    pub fn value(&self, metric: Metric) -> u64 {
        metric.select(self.send, self.receive)
    }
}

// ===== EdgeStats =====

/// Failure counts between an unordered pair of nodes.
///
/// # Invariants
///
/// - `a < b` (canonical order, so each pair has exactly one entry)
/// - `count() > 0` for every edge in an [`Aggregate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStats {
    /// Lower endpoint.
    pub a: NodeId,
    /// Higher endpoint.
    pub b: NodeId,
    /// Send failures between the pair, in either direction.
    pub send: u64,
    /// Receive failures between the pair, in either direction.
    pub receive: u64,
}

impl EdgeStats {
    /// Create an empty edge, putting the endpoints in canonical order.
    pub fn new(x: NodeId, y: NodeId) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self {
            a,
            b,
            send: 0,
            receive: 0,
        }
    }

    /// Total failures between the pair.
    pub fn count(&self) -> u64 {
        self.send.saturating_add(self.receive)
    }

    /// Edge weight under the given metric.
    pub fn weight(&self, metric: Metric) -> u64 {
        metric.select(self.send, self.receive)
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.a == node || &self.b == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.a == node {
            Some(&self.b)
        } else if &self.b == node {
            Some(&self.a)
        } else {
            None
        }
    }
}

// ===== RankedList =====

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// The ranked node.
    pub node: NodeId,
    /// Its count under the list's metric.
    pub count: u64,
}

/// Nodes ordered by failure count, worst first.
///
/// Ties are broken by node identifier so the order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedList {
    metric: Metric,
    entries: Vec<RankedEntry>,
}

impl RankedList {
    /// Metric the list was ranked by.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Rows, worst first.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the rows, worst first.
    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }
}

// ===== Aggregate =====

/// All statistics derived from one set of log records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Sorted by node identifier.
    nodes: Vec<NodeStats>,
    /// Sorted by `(a, b)`.
    edges: Vec<EdgeStats>,
}

impl Aggregate {
    /// Group records by node and by node pair.
    ///
    /// Every node seen as a source or destination gets a [`NodeStats`] entry,
    /// even when none of the failures are attributed to it. Records with a
    /// zero count contribute nodes but never edges. Counts saturate at
    /// `u64::MAX` instead of overflowing.
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut nodes: BTreeMap<NodeId, NodeStats> = BTreeMap::new();
        let mut edges: BTreeMap<(NodeId, NodeId), EdgeStats> = BTreeMap::new();

        for record in records {
            for endpoint in [record.source(), record.destination()] {
                nodes
                    .entry(endpoint.clone())
                    .or_insert_with(|| NodeStats::new(endpoint.clone()));
            }

            if record.count() == 0 {
                continue;
            }

            if let Some(stats) = nodes.get_mut(record.reporter()) {
                match record.kind() {
                    ErrorKind::Send => stats.send = stats.send.saturating_add(record.count()),
                    ErrorKind::Receive => {
                        stats.receive = stats.receive.saturating_add(record.count())
                    }
                }
            }

            let fresh = EdgeStats::new(record.source().clone(), record.destination().clone());
            let edge = edges
                .entry((fresh.a.clone(), fresh.b.clone()))
                .or_insert(fresh);
            match record.kind() {
                ErrorKind::Send => edge.send = edge.send.saturating_add(record.count()),
                ErrorKind::Receive => edge.receive = edge.receive.saturating_add(record.count()),
            }
        }

        Self {
            nodes: nodes.into_values().collect(),
            edges: edges.into_values().collect(),
        }
    }

    /// Every node, in identifier order.
    pub fn nodes(&self) -> &[NodeStats] {
        &self.nodes
    }

    /// Every pair with at least one failure, in `(a, b)` order.
    pub fn edges(&self) -> &[EdgeStats] {
        &self.edges
    }

    /// No node appeared in the input.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Statistics for one node.
    pub fn node(&self, id: &NodeId) -> Option<&NodeStats> {
        self.nodes
            .binary_search_by(|stats| stats.node.cmp(id))
            .ok()
            .map(|idx| &self.nodes[idx])
    }

    /// Position of a node in identifier order.
    pub fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.nodes.binary_search_by(|stats| stats.node.cmp(id)).ok()
    }

    /// The edge joining two nodes, in either order.
    pub fn edge_between(&self, x: &NodeId, y: &NodeId) -> Option<&EdgeStats> {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        self.edges
            .binary_search_by(|edge| (&edge.a, &edge.b).cmp(&(a, b)))
            .ok()
            .map(|idx| &self.edges[idx])
    }

    /// Edges incident to `node`.
    pub fn edges_of<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a EdgeStats> + 'a {
        self.edges.iter().filter(move |edge| edge.touches(node))
    }

    /// Sum of all node counts under the metric, saturating at `u64::MAX`.
    pub fn total(&self, metric: Metric) -> u64 {
        self.nodes
            .iter()
            .fold(0u64, |acc, stats| acc.saturating_add(stats.value(metric)))
    }

    /// Largest node count under the metric (0 when empty).
    pub fn max_node_value(&self, metric: Metric) -> u64 {
        self.nodes
            .iter()
            .map(|stats| stats.value(metric))
            .max()
            .unwrap_or(0)
    }

    /// Rank nodes by the metric, worst first, keeping at most `n`.
    pub fn ranked(&self, metric: Metric, n: usize) -> RankedList {
        let mut entries: Vec<RankedEntry> = self
            .nodes
            .iter()
            .map(|stats| RankedEntry {
                node: stats.node.clone(),
                count: stats.value(metric),
            })
            .collect();
        entries.sort_by(|x, y| y.count.cmp(&x.count).then_with(|| x.node.cmp(&y.node)));
        entries.truncate(n);

        RankedList { metric, entries }
    }

    /// Rank nodes by total failures (send + receive).
    pub fn top_ranked(&self, n: usize) -> RankedList {
        self.ranked(Metric::Combined, n)
    }

    /// Cumulative share of failures covered by the worst k servers.
    ///
    /// Element `k - 1` is the percentage (0..=100) of all failures under the
    /// metric attributed to the `k` worst nodes. Empty when there are no
    /// failures under the metric.
    pub fn cumulative_share(&self, metric: Metric) -> Vec<f64> {
        let total = self.total(metric);
        if total == 0 {
            return Vec::new();
        }

        let ranked = self.ranked(metric, self.nodes.len());
        let mut running = 0u64;
        ranked
            .iter()
            .map(|entry| {
                running = running.saturating_add(entry.count);
                running as f64 / total as f64 * 100.0
            })
            .collect()
    }
}

// ===== Tests =====
