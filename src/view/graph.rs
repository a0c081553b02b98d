//! Failure graph drawn on a braille canvas.
//!
//! Figure coordinates map onto the canvas inner area; the same mapping is
//! inverted for mouse hit-testing, so clicks land on what is drawn.

use super::constants::{HIT_RADIUS_CELLS, MAX_EDGE_STRANDS};
use super::styles::{self, ColorConfig};
use crate::figure::{Figure, FigureEdge};
use crate::graph_layout::{Bounds, Point};
use ratatui::{
    layout::{Alignment, Rect},
    style::Color,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

/// The drawable area inside the graph block's border.
pub fn inner_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Figure coordinates at the centre of terminal cell (`column`, `row`).
///
/// Returns `None` when the cell is outside `inner`.
pub fn cell_to_point(inner: Rect, bounds: Bounds, column: u16, row: u16) -> Option<Point> {
    if inner.width == 0
        || inner.height == 0
        || column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }

    let fx = (f64::from(column - inner.x) + 0.5) / f64::from(inner.width);
    let fy = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height);
    Some(Point::new(
        bounds.min.x + fx * bounds.width(),
        // Row 0 is the top of the canvas, i.e. the largest y
        bounds.max.y - fy * bounds.height(),
    ))
}

/// Hit radius in figure units for a canvas of the given size.
pub fn hit_radius(inner: Rect, bounds: Bounds) -> f64 {
    let cell_w = bounds.width() / f64::from(inner.width.max(1));
    let cell_h = bounds.height() / f64::from(inner.height.max(1));
    cell_w.max(cell_h) * HIT_RADIUS_CELLS
}

/// Render the figure into `area`.
pub fn render_graph(frame: &mut Frame, area: Rect, figure: &Figure, colors: ColorConfig) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", figure.colorbar_label));

    if let Some(message) = &figure.message {
        let inner = inner_area(area);
        frame.render_widget(block, area);
        let y = inner.y + inner.height / 2;
        let line_area = Rect::new(inner.x, y, inner.width, 1.min(inner.height));
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message.clone(),
            styles::message_text(),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, line_area);
        return;
    }

    let bounds = figure.bounds;
    let inner = inner_area(area);
    // One braille cell is 2x4 dots; offsets are a fraction of a dot column
    let strand_gap = bounds.width() / f64::from(inner.width.max(1)) / 2.0;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([bounds.min.x, bounds.max.x])
        .y_bounds([bounds.min.y, bounds.max.y])
        .paint(move |ctx| {
            for edge in &figure.edges {
                draw_edge(ctx, edge, strand_gap, edge_color(figure, edge));
            }
            ctx.layer();

            let node_radius = strand_gap * 2.0;
            for node in &figure.nodes {
                ctx.draw(&Circle {
                    x: node.position.x,
                    y: node.position.y,
                    radius: node_radius,
                    color: colors.color(node.color),
                });
                let label_style = if node.selected {
                    styles::selected_label()
                } else if node.hovered {
                    styles::title_text()
                } else {
                    ratatui::style::Style::default().fg(colors.color(node.color))
                };
                ctx.print(
                    node.position.x,
                    node.position.y,
                    Line::from(Span::styled(
                        if node.selected || node.hovered {
                            format!("● {}", node.id)
                        } else {
                            "●".to_string()
                        },
                        label_style,
                    )),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn edge_color(figure: &Figure, edge: &FigureEdge) -> Color {
    let touches_selected = figure
        .nodes
        .iter()
        .any(|n| n.selected && (n.id == edge.a || n.id == edge.b));
    if touches_selected {
        styles::SELECTED_EDGE_COLOR
    } else {
        styles::EDGE_COLOR
    }
}

/// Number of parallel strands used for an edge of the given width.
pub fn strand_count(width: f64) -> usize {
    (width.round() as usize).clamp(1, MAX_EDGE_STRANDS)
}

// Thick edges become several parallel lines offset perpendicular to the edge.
fn draw_edge(ctx: &mut Context<'_>, edge: &FigureEdge, gap: f64, color: Color) {
    let dx = edge.to.x - edge.from.x;
    let dy = edge.to.y - edge.from.y;
    let length = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if length > 0.0 {
        (-dy / length, dx / length)
    } else {
        (0.0, 0.0)
    };

    let strands = strand_count(edge.width);
    for i in 0..strands {
        let offset = (i as f64 - (strands - 1) as f64 / 2.0) * gap;
        ctx.draw(&CanvasLine {
            x1: edge.from.x + nx * offset,
            y1: edge.from.y + ny * offset,
            x2: edge.to.x + nx * offset,
            y2: edge.to.y + ny * offset,
            color,
        });
    }
}
