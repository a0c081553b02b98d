//! Controls and details next to the graph.
//!
//! Top to bottom: metric selector, threshold gauge, colour bar, details of
//! the hovered (or selected) node, and the ranking under the current metric.

use super::constants::{
    COLOR_BAR_HEIGHT, METRIC_SELECTOR_HEIGHT, NODE_DETAILS_HEIGHT, THRESHOLD_GAUGE_HEIGHT,
};
use super::styles::{self, ColorConfig};
use crate::figure::{reds, Figure, ViewState};
use crate::model::{Aggregate, Metric};
use crate::state::view_handler::max_threshold;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

const COLOR_BAR_CELLS: usize = 16;

/// Everything the side panel reads.
pub struct SidePanel<'a> {
    pub figure: &'a Figure,
    pub view: &'a ViewState,
    pub aggregate: &'a Aggregate,
    pub top_n: usize,
    pub colors: ColorConfig,
}

impl SidePanel<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [metric_area, threshold_area, bar_area, details_area, ranking_area] = Layout::vertical([
            Constraint::Length(METRIC_SELECTOR_HEIGHT),
            Constraint::Length(THRESHOLD_GAUGE_HEIGHT),
            Constraint::Length(COLOR_BAR_HEIGHT),
            Constraint::Length(NODE_DETAILS_HEIGHT),
            Constraint::Min(3),
        ])
        .areas(area);

        self.render_metric_selector(frame, metric_area);
        self.render_threshold(frame, threshold_area);
        self.render_color_bar(frame, bar_area);
        self.render_node_details(frame, details_area);
        self.render_ranking(frame, ranking_area);
    }

    fn render_metric_selector(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Metric::ALL
            .iter()
            .map(|metric| {
                if *metric == self.view.metric {
                    ListItem::new(format!("▸ {}", metric.label())).style(styles::active_item())
                } else {
                    ListItem::new(format!("  {}", metric.label()))
                }
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Errors [m] "),
        );
        frame.render_widget(list, area);
    }

    fn render_threshold(&self, frame: &mut Frame, area: Rect) {
        let max = max_threshold(self.aggregate, self.view.metric);
        let ratio = (self.view.threshold as f64 / max as f64).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Min failures [-/+] "),
            )
            .gauge_style(Style::default().fg(ratatui::style::Color::Red))
            .ratio(ratio)
            .label(format!("{} / {}", self.view.threshold, max));
        frame.render_widget(gauge, area);
    }

    fn render_color_bar(&self, frame: &mut Frame, area: Rect) {
        let cells: Vec<Span> = (0..COLOR_BAR_CELLS)
            .map(|i| {
                let t = i as f64 / (COLOR_BAR_CELLS - 1) as f64;
                Span::styled("█", Style::default().fg(self.colors.color(reds(t))))
            })
            .collect();

        let lines = vec![
            Line::from(cells),
            Line::from(Span::styled(
                format!("0 .. {}", self.figure.max_value),
                styles::muted_text(),
            )),
        ];
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.figure.colorbar_label)),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_node_details(&self, frame: &mut Frame, area: Rect) {
        let focus = self
            .view
            .hovered
            .as_ref()
            .or(self.view.selected.as_ref())
            .and_then(|id| self.figure.node(id));

        let lines: Vec<Line> = match focus {
            Some(node) => node.hover.lines().map(|l| Line::from(l.to_string())).collect(),
            None => vec![Line::from(Span::styled(
                "Hover or click a node",
                styles::muted_text(),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Node [j/k] "));
        frame.render_widget(paragraph, area);
    }

    fn render_ranking(&self, frame: &mut Frame, area: Rect) {
        let ranked = self.aggregate.ranked(self.view.metric, self.top_n);
        let items: Vec<ListItem> = ranked
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let text = format!("{:>3}. {:<24} {:>8}", i + 1, entry.node.to_string(), entry.count);
                if self.view.selected.as_ref() == Some(&entry.node) {
                    ListItem::new(text).style(styles::selected_label())
                } else {
                    ListItem::new(text)
                }
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Top {} ", ranked.len())),
        );
        frame.render_widget(list, area);
    }
}
