//! View state machine (pure).
//!
//! Every transition takes the current [`ViewState`] by reference and returns
//! the next one, so handlers are testable without a terminal.
//!
//! [`ViewState`]: crate::figure::ViewState

pub mod pointer_handler;
pub mod view_handler;

// Re-export for convenience
pub use pointer_handler::{handle_click, handle_hover};
pub use view_handler::handle_view_action;
