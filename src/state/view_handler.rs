//! Keyboard action handler for the graph view.
//!
//! Pure functions that map a [`KeyAction`] and the current [`ViewState`] to
//! the next ViewState. Actions the view does not own (help, quit) leave the
//! state unchanged; the event loop handles those.

use crate::figure::ViewState;
use crate::model::{Aggregate, KeyAction, Metric, NodeId};
use tracing::debug;

/// Apply a keyboard action to the view.
///
/// # Arguments
/// * `state` - Current view state (never modified)
/// * `action` - The action to apply
/// * `aggregate` - Statistics the view is showing, used for node order and
///   threshold limits
pub fn handle_view_action(state: &ViewState, action: KeyAction, aggregate: &Aggregate) -> ViewState {
    let next = match action {
        KeyAction::NextMetric => with_metric(state, state.metric.next(), aggregate),
        KeyAction::PrevMetric => with_metric(state, state.metric.prev(), aggregate),
        KeyAction::RaiseThreshold => {
            let limit = max_threshold(aggregate, state.metric);
            let threshold = state.threshold.saturating_add(1).min(limit);
            state.clone().with_threshold(threshold)
        }
        KeyAction::LowerThreshold => {
            let threshold = state.threshold.saturating_sub(1).max(1);
            state.clone().with_threshold(threshold)
        }
        KeyAction::NextNode => state
            .clone()
            .with_selected(step_node(aggregate, state.selected.as_ref(), Step::Forward)),
        KeyAction::PrevNode => state
            .clone()
            .with_selected(step_node(aggregate, state.selected.as_ref(), Step::Back)),
        KeyAction::SelectWorst => {
            let worst = aggregate
                .ranked(state.metric, 1)
                .iter()
                .next()
                .map(|entry| entry.node.clone());
            state.clone().with_selected(worst.or_else(|| state.selected.clone()))
        }
        KeyAction::ClearSelection => state.clone().with_selected(None),
        KeyAction::Help | KeyAction::Quit => state.clone(),
    };

    debug!(?action, metric = %next.metric, threshold = next.threshold, "View action applied");
    next
}

/// Highest useful threshold: the heaviest edge under `metric`, at least 1.
pub fn max_threshold(aggregate: &Aggregate, metric: Metric) -> u64 {
    aggregate
        .edges()
        .iter()
        .map(|edge| edge.weight(metric))
        .max()
        .unwrap_or(0)
        .max(1)
}

// Switching metric can shrink the weight range; keep the threshold reachable.
fn with_metric(state: &ViewState, metric: Metric, aggregate: &Aggregate) -> ViewState {
    let threshold = state.threshold.min(max_threshold(aggregate, metric));
    state.clone().with_metric(metric).with_threshold(threshold)
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Forward,
    Back,
}

fn step_node(aggregate: &Aggregate, current: Option<&NodeId>, step: Step) -> Option<NodeId> {
    let nodes = aggregate.nodes();
    if nodes.is_empty() {
        return None;
    }
    let last = nodes.len() - 1;

    let index = match (current.and_then(|id| aggregate.node_index(id)), step) {
        (None, Step::Forward) => 0,
        (None, Step::Back) => last,
        (Some(i), Step::Forward) => if i == last { 0 } else { i + 1 },
        (Some(i), Step::Back) => if i == 0 { last } else { i - 1 },
    };

    Some(nodes[index].node.clone())
}

// ===== Tests =====

#[cfg(test)]
#[path = "view_handler_tests.rs"]
mod tests;
