//! Tests for view_handler module.

use super::*;
use crate::model::{ErrorKind, LogRecord, Timestamp};

fn node(s: &str) -> NodeId {
    NodeId::parse(s).unwrap()
}

fn rec(src: &str, dst: &str, kind: ErrorKind, count: u64) -> LogRecord {
    LogRecord::new(node(src), node(dst), kind, Timestamp::new("t").unwrap(), count)
}

fn aggregate() -> Aggregate {
    Aggregate::from_records(&[
        rec("10.0.0.1", "10.0.0.2", ErrorKind::Send, 4),
        rec("10.0.0.3", "10.0.0.2", ErrorKind::Receive, 6),
        rec("10.0.0.3", "10.0.0.1", ErrorKind::Send, 1),
    ])
}

#[test]
fn next_metric_cycles_and_leaves_input_untouched() {
    let state = ViewState::default();
    let before = state.clone();

    let next = handle_view_action(&state, KeyAction::NextMetric, &aggregate());

    assert_eq!(state, before);
    assert_eq!(next.metric, Metric::Send);
    assert_eq!(
        handle_view_action(&next, KeyAction::PrevMetric, &aggregate()).metric,
        Metric::Combined
    );
}

#[test]
fn raise_threshold_stops_at_heaviest_edge() {
    let agg = aggregate();
    let mut state = ViewState::default();
    for _ in 0..20 {
        state = handle_view_action(&state, KeyAction::RaiseThreshold, &agg);
    }
    assert_eq!(state.threshold, 6);
}

#[test]
fn lower_threshold_never_goes_below_one() {
    let state = ViewState::default().with_threshold(2);
    let once = handle_view_action(&state, KeyAction::LowerThreshold, &aggregate());
    let twice = handle_view_action(&once, KeyAction::LowerThreshold, &aggregate());
    assert_eq!(once.threshold, 1);
    assert_eq!(twice.threshold, 1);
}

#[test]
fn switching_metric_clamps_threshold() {
    // Send edges weigh at most 4
    let state = ViewState::default().with_threshold(6);
    let next = handle_view_action(&state, KeyAction::NextMetric, &aggregate());
    assert_eq!(next.metric, Metric::Send);
    assert_eq!(next.threshold, 4);
}

#[test]
fn next_node_walks_identifier_order_and_wraps() {
    let agg = aggregate();
    let first = handle_view_action(&ViewState::default(), KeyAction::NextNode, &agg);
    assert_eq!(first.selected, Some(node("10.0.0.1")));

    let second = handle_view_action(&first, KeyAction::NextNode, &agg);
    assert_eq!(second.selected, Some(node("10.0.0.2")));

    let third = handle_view_action(&second, KeyAction::NextNode, &agg);
    let wrapped = handle_view_action(&third, KeyAction::NextNode, &agg);
    assert_eq!(wrapped.selected, Some(node("10.0.0.1")));
}

#[test]
fn prev_node_from_nothing_selects_last() {
    let next = handle_view_action(&ViewState::default(), KeyAction::PrevNode, &aggregate());
    assert_eq!(next.selected, Some(node("10.0.0.3")));
}

#[test]
fn select_worst_uses_current_metric() {
    let agg = aggregate();
    // Combined: .1 has 4, .2 has 6, .3 has 1
    let combined = handle_view_action(&ViewState::default(), KeyAction::SelectWorst, &agg);
    assert_eq!(combined.selected, Some(node("10.0.0.2")));

    let send_state = ViewState::default().with_metric(Metric::Send);
    let send = handle_view_action(&send_state, KeyAction::SelectWorst, &agg);
    assert_eq!(send.selected, Some(node("10.0.0.1")));
}

#[test]
fn clear_selection_drops_selected_node() {
    let state = ViewState::default().with_selected(Some(node("10.0.0.2")));
    let next = handle_view_action(&state, KeyAction::ClearSelection, &aggregate());
    assert_eq!(next.selected, None);
    assert_eq!(state.selected, Some(node("10.0.0.2")));
}

#[test]
fn node_actions_on_empty_aggregate_select_nothing() {
    let empty = Aggregate::default();
    for action in [KeyAction::NextNode, KeyAction::PrevNode, KeyAction::SelectWorst] {
        let next = handle_view_action(&ViewState::default(), action, &empty);
        assert_eq!(next.selected, None, "{action:?}");
    }
    let raised = handle_view_action(&ViewState::default(), KeyAction::RaiseThreshold, &empty);
    assert_eq!(raised.threshold, 1);
}

#[test]
fn help_and_quit_leave_view_alone() {
    let state = ViewState::default().with_threshold(3);
    assert_eq!(handle_view_action(&state, KeyAction::Help, &aggregate()), state);
    assert_eq!(handle_view_action(&state, KeyAction::Quit, &aggregate()), state);
}
