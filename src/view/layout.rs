//! Screen layout: header, graph, side panel and status bar.

use super::constants::{HEADER_HEIGHT, SIDE_PANEL_WIDTH, STATUS_BAR_HEIGHT};
use super::graph::render_graph;
use super::side_panel::SidePanel;
use super::styles::{self, ColorConfig};
use crate::figure::{Figure, ViewState};
use crate::model::Aggregate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title and subtitle.
    pub header: Rect,
    /// Graph canvas.
    pub graph: Rect,
    /// Controls and details; zero width on narrow terminals.
    pub side_panel: Rect,
    /// Key hints and edge count.
    pub status_bar: Rect,
}

impl ScreenLayout {
    /// Split `area`. The side panel is dropped on terminals too narrow to fit
    /// it next to a usable graph.
    pub fn new(area: Rect) -> Self {
        let [header, body, status_bar] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        if body.width < SIDE_PANEL_WIDTH * 2 {
            return Self {
                header,
                graph: body,
                side_panel: Rect::new(body.x + body.width, body.y, 0, body.height),
                status_bar,
            };
        }

        let [graph, side_panel] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(SIDE_PANEL_WIDTH)])
                .areas(body);

        Self {
            header,
            graph,
            side_panel,
            status_bar,
        }
    }
}

/// What one frame shows.
pub struct FrameContent<'a> {
    pub figure: &'a Figure,
    pub view: &'a ViewState,
    pub aggregate: &'a Aggregate,
    pub top_n: usize,
    pub colors: ColorConfig,
}

/// Render a full frame into `layout`.
pub fn render_layout(frame: &mut Frame, layout: ScreenLayout, content: &FrameContent<'_>) {
    render_header(frame, layout.header, content.figure);
    render_graph(frame, layout.graph, content.figure, content.colors);

    if layout.side_panel.width > 0 {
        SidePanel {
            figure: content.figure,
            view: content.view,
            aggregate: content.aggregate,
            top_n: content.top_n,
            colors: content.colors,
        }
        .render(frame, layout.side_panel);
    }

    render_status_bar(frame, layout.status_bar, content.figure);
}

fn render_header(frame: &mut Frame, area: Rect, figure: &Figure) {
    let lines = vec![
        Line::from(Span::styled(figure.title.clone(), styles::title_text())),
        Line::from(Span::styled(figure.subtitle.clone(), styles::muted_text())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Status line: visible edge count and key hints.
pub fn status_text(figure: &Figure) -> String {
    format!(
        " {} nodes, {} edges shown | m: metric | -/+: threshold | j/k: node | Esc: clear | ?: help | q: quit",
        figure.nodes.len(),
        figure.edges.len()
    )
}

fn render_status_bar(frame: &mut Frame, area: Rect, figure: &Figure) {
    let paragraph = Paragraph::new(Line::from(status_text(figure))).style(styles::muted_text());
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminal_gets_side_panel() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 140, 40));
        assert_eq!(layout.side_panel.width, SIDE_PANEL_WIDTH);
        assert_eq!(layout.graph.width, 140 - SIDE_PANEL_WIDTH);
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.status_bar.y, 39);
    }

    #[test]
    fn narrow_terminal_drops_side_panel() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 60, 20));
        assert_eq!(layout.side_panel.width, 0);
        assert_eq!(layout.graph.width, 60);
    }
}
