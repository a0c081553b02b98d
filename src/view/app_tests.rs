use super::*;
use crate::graph_layout::LayoutOptions;
use crate::model::{Aggregate, ErrorKind, LogRecord, Metric, NodeId, Timestamp};
use ratatui::backend::TestBackend;

fn node(s: &str) -> NodeId {
    NodeId::parse(s).unwrap()
}

fn record(src: &str, dst: &str, kind: ErrorKind, count: u64) -> LogRecord {
    LogRecord::new(node(src), node(dst), kind, Timestamp::new("t").unwrap(), count)
}

fn test_model() -> GraphModel {
    let records = vec![
        record("10.0.0.1", "10.0.0.2", ErrorKind::Send, 3),
        record("10.0.0.2", "10.0.0.3", ErrorKind::Receive, 1),
    ];
    GraphModel::new(Aggregate::from_records(&records), LayoutOptions::default())
}

// Helper to create test TuiApp
fn create_test_app(width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::with_terminal(terminal, test_model(), ViewState::default(), 25)
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn buffer_text(app: &TuiApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// Terminal cell the given node is drawn in, for the last drawn layout.
fn cell_of(app: &TuiApp<TestBackend>, id: &NodeId) -> (u16, u16) {
    let figure = app.figure();
    let inner = graph::inner_area(app.last_graph_area.unwrap());
    let position = figure.node(id).unwrap().position;
    let bounds = figure.bounds;
    let fx = (position.x - bounds.min.x) / bounds.width();
    let fy = (bounds.max.y - position.y) / bounds.height();
    let col = inner.x + ((fx * f64::from(inner.width)) as u16).min(inner.width - 1);
    let row = inner.y + ((fy * f64::from(inner.height)) as u16).min(inner.height - 1);
    (col, row)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn handle_key_q_returns_true() {
    let mut app = create_test_app(80, 24);
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn handle_key_ctrl_c_returns_true() {
    let mut app = create_test_app(80, 24);
    let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.handle_key(key));
}

#[test]
fn handle_key_unbound_is_ignored() {
    let mut app = create_test_app(80, 24);
    let before = app.view().clone();
    assert!(!press(&mut app, KeyCode::Char('z')));
    assert_eq!(app.view(), &before);
}

#[test]
fn handle_key_m_cycles_metric() {
    let mut app = create_test_app(80, 24);
    assert_eq!(app.view().metric, Metric::Combined);

    assert!(!press(&mut app, KeyCode::Char('m')));
    assert_eq!(app.view().metric, Metric::Send);
}

#[test]
fn handle_key_threshold_is_capped_at_heaviest_edge() {
    let mut app = create_test_app(80, 24);
    for _ in 0..10 {
        press(&mut app, KeyCode::Char('+'));
    }
    assert_eq!(app.view().threshold, 3);

    for _ in 0..10 {
        press(&mut app, KeyCode::Char('-'));
    }
    assert_eq!(app.view().threshold, 1);
}

#[test]
fn handle_key_g_selects_worst_node_and_esc_clears() {
    let mut app = create_test_app(80, 24);

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.view().selected, Some(node("10.0.0.1")));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.view().selected, None);
}

#[test]
fn help_overlay_swallows_keys_until_closed() {
    let mut app = create_test_app(80, 24);
    press(&mut app, KeyCode::Char('?'));
    assert!(app.help_visible);

    // View keys do nothing while help is open
    press(&mut app, KeyCode::Char('m'));
    assert_eq!(app.view().metric, Metric::Combined);

    press(&mut app, KeyCode::Esc);
    assert!(!app.help_visible);
}

#[test]
fn help_overlay_still_quits_on_q() {
    let mut app = create_test_app(80, 24);
    press(&mut app, KeyCode::Char('?'));
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn draw_renders_without_error() {
    let mut app = create_test_app(80, 24);
    let result = app.draw();
    assert!(result.is_ok(), "Draw should succeed with valid state");
}

#[test]
fn draw_shows_title_and_status_bar() {
    let mut app = create_test_app(120, 40);
    app.draw().unwrap();

    let text = buffer_text(&app);
    assert!(text.contains("Interactive Graph of Network Failures"));
    assert!(text.contains("Selected Node: All Nodes"));
    assert!(text.contains("3 nodes, 2 edges shown"));
}

#[test]
fn draw_shows_side_panel_on_wide_terminal() {
    let mut app = create_test_app(120, 40);
    app.draw().unwrap();

    let text = buffer_text(&app);
    assert!(text.contains("Min failures"));
    assert!(text.contains("Top 3"));
}

#[test]
fn draw_with_help_visible_shows_overlay() {
    let mut app = create_test_app(100, 40);
    press(&mut app, KeyCode::Char('?'));
    app.draw().unwrap();

    assert!(buffer_text(&app).contains("Keyboard Shortcuts"));
}

#[test]
fn draw_empty_model_shows_message() {
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut app = TuiApp::with_terminal(terminal, GraphModel::default(), ViewState::default(), 25);
    app.draw().unwrap();

    assert!(buffer_text(&app).contains("No errors found in the input logs"));
}

#[test]
fn mouse_before_first_draw_is_ignored() {
    let mut app = create_test_app(80, 24);
    assert!(!app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10)));
    assert_eq!(app.view().selected, None);
}

#[test]
fn click_on_node_selects_it_and_second_click_clears() {
    let mut app = create_test_app(80, 24);
    app.draw().unwrap();
    let target = node("10.0.0.2");
    let (col, row) = cell_of(&app, &target);

    assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), col, row)));
    assert_eq!(app.view().selected, Some(target));

    assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), col, row)));
    assert_eq!(app.view().selected, None);
}

#[test]
fn mouse_move_hovers_node() {
    let mut app = create_test_app(80, 24);
    app.draw().unwrap();
    let target = node("10.0.0.3");
    let (col, row) = cell_of(&app, &target);

    assert!(app.handle_mouse(mouse(MouseEventKind::Moved, col, row)));
    assert_eq!(app.view().hovered, Some(target));

    // Same position again: nothing changes
    assert!(!app.handle_mouse(mouse(MouseEventKind::Moved, col, row)));
}

#[test]
fn mouse_outside_graph_is_ignored() {
    let mut app = create_test_app(80, 24);
    app.draw().unwrap();

    // Row 0 is the header
    assert!(!app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 0)));
    assert_eq!(app.view().selected, None);
}
