//! TUI integration tests
//!
//! Drive the interactive view with key events on a TestBackend and check
//! both the view state and what ends up on screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use netfail::figure::GraphModel;
use netfail::graph_layout::{LayoutKind, LayoutOptions};
use netfail::model::{Metric, NodeId};
use netfail::pipeline::{analyze, initial_view};
use netfail::view::TuiApp;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn cluster_app(width: u16, height: u16) -> TuiApp<TestBackend> {
    let analysis = analyze(&[fixture("cluster.log")], None).unwrap();
    let view = initial_view(&analysis.aggregate, Metric::Combined, 1, None);
    let layout = LayoutOptions {
        kind: LayoutKind::Circle,
        ..LayoutOptions::default()
    };
    let model = GraphModel::new(analysis.aggregate, layout);
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::with_terminal(terminal, model, view, 25)
}

fn press(app: &mut TuiApp<TestBackend>, c: char) -> bool {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn screen(app: &TuiApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn initial_frame_shows_all_nodes() {
    let mut app = cluster_app(140, 45);
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("Selected Node: All Nodes"));
    assert!(text.contains("7 nodes, 7 edges shown"));
    assert!(text.contains("Num of Failures Send+Receive"));
}

#[test]
fn node_slider_walks_nodes_in_identifier_order() {
    let mut app = cluster_app(140, 45);

    press(&mut app, 'j');
    assert_eq!(app.view().selected, Some(NodeId::parse("10.1.0.1").unwrap()));
    press(&mut app, 'j');
    assert_eq!(app.view().selected, Some(NodeId::parse("10.1.0.2").unwrap()));
    press(&mut app, 'k');
    assert_eq!(app.view().selected, Some(NodeId::parse("10.1.0.1").unwrap()));

    app.draw().unwrap();
    let text = screen(&app);
    assert!(text.contains("Selected Node: 10.1.0.1"));
    // 10.1.0.1 touches .2, .3, .5 and storage-a
    assert!(text.contains("7 nodes, 4 edges shown"));
}

#[test]
fn metric_and_threshold_change_visible_edges() {
    let mut app = cluster_app(140, 45);

    // Send only: (.1,.2)=4, (.1,.3)=1, (.3,.4)=2, (.1,.5)=1, (storage-a,storage-b)=1
    press(&mut app, 'm');
    assert_eq!(app.view().metric, Metric::Send);
    app.draw().unwrap();
    assert!(screen(&app).contains("7 nodes, 5 edges shown"));

    press(&mut app, '+');
    assert_eq!(app.view().threshold, 2);
    app.draw().unwrap();
    assert!(screen(&app).contains("7 nodes, 2 edges shown"));
}

#[test]
fn help_overlay_opens_and_closes() {
    let mut app = cluster_app(120, 40);

    press(&mut app, '?');
    app.draw().unwrap();
    assert!(screen(&app).contains("Keyboard Shortcuts"));

    press(&mut app, '?');
    app.draw().unwrap();
    assert!(!screen(&app).contains("Keyboard Shortcuts"));
}

#[test]
fn quit_key_ends_the_session() {
    let mut app = cluster_app(80, 24);
    assert!(!press(&mut app, 'm'));
    assert!(press(&mut app, 'q'));
}
