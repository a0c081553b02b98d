//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header (title and selected node) in lines.
pub const HEADER_HEIGHT: u16 = 2;

/// Height of the status bar in lines.
///
/// Single line for keyboard hints and the visible edge count.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the side panel in columns.
///
/// Holds the metric selector, threshold gauge, node details and ranking.
pub const SIDE_PANEL_WIDTH: u16 = 44;

/// Height of the metric selector block (three options plus borders).
pub const METRIC_SELECTOR_HEIGHT: u16 = 5;

/// Height of the threshold gauge block.
pub const THRESHOLD_GAUGE_HEIGHT: u16 = 3;

/// Height of the colour bar block.
pub const COLOR_BAR_HEIGHT: u16 = 4;

/// Height of the node details block.
pub const NODE_DETAILS_HEIGHT: u16 = 6;

/// Pointer distance, in terminal cells, within which a node counts as hit.
pub const HIT_RADIUS_CELLS: f64 = 1.5;

/// Most parallel strands used to draw a thick edge.
pub const MAX_EDGE_STRANDS: usize = 4;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;
