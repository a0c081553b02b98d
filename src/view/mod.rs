//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod graph;
mod help;
mod layout;
mod side_panel;
mod styles;

pub use graph::{cell_to_point, hit_radius};
pub use help::render_help_overlay;
pub use layout::ScreenLayout;
pub use styles::ColorConfig;

use crate::config::keybindings::KeyBindings;
use crate::figure::{render, Figure, GraphModel, ViewState};
use crate::model::KeyAction;
use crate::state::{handle_click, handle_hover, handle_view_action};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use layout::FrameContent;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Interactive graph view.
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    model: GraphModel,
    view: ViewState,
    top_n: usize,
    key_bindings: KeyBindings,
    colors: ColorConfig,
    help_visible: bool,
    /// Graph area from the last draw (for mouse hit-testing)
    last_graph_area: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize the interactive view.
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(model: GraphModel, view: ViewState, top_n: usize) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, model, view, top_n))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). There is no background work,
    /// so the loop only redraws in response to terminal events.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let redraw = match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    true
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(_, _) => true,
                _ => false,
            };

            if redraw {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app around an already-initialized terminal.
    pub fn with_terminal(terminal: Terminal<B>, model: GraphModel, view: ViewState, top_n: usize) -> Self {
        Self {
            terminal,
            model,
            view,
            top_n,
            key_bindings: KeyBindings::default(),
            colors: ColorConfig::default(),
            help_visible: false,
            last_graph_area: None,
        }
    }

    /// Current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// The figure for the current view.
    pub fn figure(&self) -> Figure {
        render(&self.model, &self.view)
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if rebound or help is open
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.help_visible {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.help_visible = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.help_visible = true,
            _ => {
                self.view = handle_view_action(&self.view, action, self.model.aggregate());
            }
        }

        false
    }

    /// Handle a single mouse event
    ///
    /// Left click selects the node under the pointer, movement hovers it.
    /// Returns true if the view changed and needs a redraw.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.help_visible {
            return false;
        }
        let Some(area) = self.last_graph_area else {
            return false;
        };

        let figure = self.figure();
        let inner = graph::inner_area(area);
        let Some(point) = cell_to_point(inner, figure.bounds, mouse.column, mouse.row) else {
            return false;
        };
        let radius = hit_radius(inner, figure.bounds);

        let next = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => handle_click(&self.view, &figure, point, radius),
            MouseEventKind::Moved => handle_hover(&self.view, &figure, point, radius),
            _ => return false,
        };

        if next == self.view {
            return false;
        }
        debug!(selected = ?next.selected, hovered = ?next.hovered, "Pointer changed view");
        self.view = next;
        true
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let figure = self.figure();
        let size = self.terminal.size()?;
        let screen = ScreenLayout::new(Rect::new(0, 0, size.width, size.height));
        self.last_graph_area = Some(screen.graph);

        let content = FrameContent {
            figure: &figure,
            view: &self.view,
            aggregate: self.model.aggregate(),
            top_n: self.top_n,
            colors: self.colors,
        };
        let help_visible = self.help_visible;

        self.terminal.draw(|frame| {
            layout::render_layout(frame, screen, &content);
            if help_visible {
                render_help_overlay(frame);
            }
        })?;

        Ok(())
    }
}

/// Run the interactive view until the user quits.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_interactive(model: GraphModel, view: ViewState, top_n: usize) -> Result<(), TuiError> {
    info!(nodes = model.aggregate().nodes().len(), "Starting interactive view");
    let mut app = TuiApp::new(model, view, top_n)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
