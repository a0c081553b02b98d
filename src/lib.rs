//! netfail
//!
//! Visualize send/receive failures between cluster nodes from network
//! error logs.
//!
//! Pure core (parser, aggregation, layout, figure, dispatch) with a thin
//! impure shell (file reading, HTML output, terminal UI).

pub mod config;
pub mod figure;
pub mod graph_layout;
pub mod html;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod state;
pub mod view;
