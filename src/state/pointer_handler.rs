//! Mouse handler for the graph view.
//!
//! Pure functions that map a pointer position, already converted to figure
//! coordinates, to the next ViewState.

use crate::figure::{Figure, ViewState};
use crate::graph_layout::Point;

/// Select the node under the pointer.
///
/// Clicking the selected node again clears the selection. Clicks on empty
/// space leave the state unchanged.
pub fn handle_click(state: &ViewState, figure: &Figure, point: Point, radius: f64) -> ViewState {
    match figure.node_at(point, radius) {
        Some(node) if state.selected.as_ref() == Some(&node.id) => state.clone().with_selected(None),
        Some(node) => state.clone().with_selected(Some(node.id.clone())),
        None => state.clone(),
    }
}

/// Hover the node under the pointer, or nothing.
pub fn handle_hover(state: &ViewState, figure: &Figure, point: Point, radius: f64) -> ViewState {
    let hovered = figure.node_at(point, radius).map(|node| node.id.clone());
    state.clone().with_hovered(hovered)
}
