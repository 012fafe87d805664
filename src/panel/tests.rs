use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use ratatui::{Terminal, backend::TestBackend};

use super::*;
use crate::config::PanelSettings;
use crate::link::{DisplayCommand, HostLink, Key, Section};

#[derive(Default)]
struct RecordingCanvas {
    redraws: Vec<(Section, String)>,
}

impl Canvas for RecordingCanvas {
    fn redraw(&mut self, section: Section, content: &str) -> io::Result<()> {
        self.redraws.push((section, content.to_string()));
        Ok(())
    }
}

struct FailingCanvas;

impl Canvas for FailingCanvas {
    fn redraw(&mut self, _section: Section, _content: &str) -> io::Result<()> {
        Err(io::Error::other("display unplugged"))
    }
}

#[derive(Clone, Default)]
struct FakeLine(Rc<Cell<bool>>);

impl FakeLine {
    fn press(&self) {
        self.0.set(true);
    }

    fn release(&self) {
        self.0.set(false);
    }
}

impl KeyLine for FakeLine {
    fn is_active(&self) -> bool {
        self.0.get()
    }
}

fn scanner_with(lines: &[(Key, FakeLine)]) -> KeyScanner {
    let bindings = lines
        .iter()
        .map(|(key, line)| (*key, Box::new(line.clone()) as Box<dyn KeyLine>))
        .collect();
    KeyScanner::new(bindings, DEFAULT_DEBOUNCE)
}

#[test]
fn identical_command_redraws_once() {
    let mut state = DisplayState::new();
    let mut canvas = RecordingCanvas::default();
    let command = DisplayCommand::new(Section::Track, "3. Come Together");

    assert!(state.render(&command, &mut canvas).unwrap());
    assert!(!state.render(&command, &mut canvas).unwrap());

    assert_eq!(
        canvas.redraws,
        vec![(Section::Track, "3. Come Together".to_string())]
    );
    assert_eq!(state.get(Section::Track), "3. Come Together");
}

#[test]
fn changed_content_redraws_only_its_region() {
    let mut state = DisplayState::new();
    let mut canvas = RecordingCanvas::default();

    state
        .render(&DisplayCommand::new(Section::Time, "00:01/03:00"), &mut canvas)
        .unwrap();
    state
        .render(&DisplayCommand::new(Section::Artist, "The Beatles"), &mut canvas)
        .unwrap();
    state
        .render(&DisplayCommand::new(Section::Time, "00:02/03:00"), &mut canvas)
        .unwrap();

    assert_eq!(canvas.redraws.len(), 3);
    assert_eq!(state.time, "00:02/03:00");
    assert_eq!(state.artist, "The Beatles");
    assert!(state.album.is_empty());
}

#[test]
fn empty_content_on_fresh_state_is_a_no_op() {
    let mut state = DisplayState::new();
    let mut canvas = RecordingCanvas::default();
    let changed = state
        .render(&DisplayCommand::new(Section::Album, ""), &mut canvas)
        .unwrap();
    assert!(!changed);
    assert!(canvas.redraws.is_empty());
}

#[test]
fn failed_redraw_leaves_cache_untouched() {
    let mut state = DisplayState::new();
    let command = DisplayCommand::new(Section::PlayerStatus, "Playing");

    assert!(state.render(&command, &mut FailingCanvas).is_err());
    assert!(state.player_status.is_empty());

    let mut canvas = RecordingCanvas::default();
    assert!(state.render(&command, &mut canvas).unwrap());
}

#[test]
fn presses_within_debounce_emit_once() {
    let next = FakeLine::default();
    let mut scanner = scanner_with(&[(Key::Next, next.clone())]);
    let start = Instant::now();

    next.press();
    assert_eq!(scanner.scan_at(start), vec![Key::Next]);
    assert!(scanner.scan_at(start + Duration::from_millis(13)).is_empty());
    assert!(scanner.scan_at(start + Duration::from_millis(249)).is_empty());
}

#[test]
fn debounce_is_shared_across_keys() {
    let play = FakeLine::default();
    let eject = FakeLine::default();
    let mut scanner = scanner_with(&[(Key::PlayPause, play.clone()), (Key::Eject, eject.clone())]);
    let start = Instant::now();

    play.press();
    assert_eq!(scanner.scan_at(start), vec![Key::PlayPause]);

    play.release();
    eject.press();
    assert!(scanner.scan_at(start + Duration::from_millis(100)).is_empty());
    assert_eq!(
        scanner.scan_at(start + Duration::from_millis(350)),
        vec![Key::Eject]
    );
}

#[test]
fn presses_spaced_by_debounce_each_emit() {
    let prev = FakeLine::default();
    let mut scanner = scanner_with(&[(Key::Prev, prev.clone())]);
    let start = Instant::now();

    prev.press();
    let emitted: Vec<Key> = (0..3)
        .flat_map(|i| scanner.scan_at(start + DEFAULT_DEBOUNCE * i))
        .collect();
    assert_eq!(emitted, vec![Key::Prev, Key::Prev, Key::Prev]);
}

#[test]
fn simultaneous_keys_report_first_binding_only() {
    let play = FakeLine::default();
    let next = FakeLine::default();
    let mut scanner = scanner_with(&[(Key::PlayPause, play.clone()), (Key::Next, next.clone())]);

    play.press();
    next.press();
    assert_eq!(scanner.scan_at(Instant::now()), vec![Key::PlayPause]);
}

#[test]
fn idle_lines_emit_nothing() {
    let line = FakeLine::default();
    let mut scanner = scanner_with(&[(Key::Eject, line)]);
    assert!(scanner.scan().is_empty());
}

fn panel_with(
    lines: &[(Key, FakeLine)],
) -> (
    Panel<RecordingCanvas, Vec<u8>>,
    mpsc::Sender<DisplayCommand>,
) {
    let (tx, rx) = mpsc::channel();
    let panel = Panel::new(
        RecordingCanvas::default(),
        scanner_with(lines),
        HostLink::new(Vec::new()),
        rx,
    );
    (panel, tx)
}

#[test]
fn startup_shows_banner_glyph_then_waiting_text() {
    let (mut panel, _tx) = panel_with(&[]);
    let settings = PanelSettings {
        splash_ms: 0,
        ..PanelSettings::default()
    };

    panel.show_startup(&settings).unwrap();

    assert_eq!(
        panel.canvas().redraws,
        vec![
            (Section::PlayerStatus, VERSION_BANNER.to_string()),
            (Section::PlayerStatus, SPLASH_GLYPH.to_string()),
            (Section::PlayerStatus, "Waiting Player...".to_string()),
        ]
    );
    assert!(panel.state().player_status.is_empty());
}

#[test]
fn tick_sends_keys_and_renders_pending_commands() {
    let eject = FakeLine::default();
    let (mut panel, tx) = panel_with(&[(Key::Eject, eject.clone())]);

    tx.send(DisplayCommand::new(Section::PlayerStatus, "Player OK"))
        .unwrap();
    tx.send(DisplayCommand::new(Section::PlayerStatus, "Player OK"))
        .unwrap();
    tx.send(DisplayCommand::new(Section::Album, "Abbey Road"))
        .unwrap();
    eject.press();

    panel.tick_at(Instant::now()).unwrap();

    let sent = String::from_utf8(panel.host().get_ref().clone()).unwrap();
    assert_eq!(sent, "{\"event\":\"keypress\",\"key\":\"Eject\"}\n");
    assert_eq!(panel.canvas().redraws.len(), 2);
    assert_eq!(panel.state().album, "Abbey Road");
}

#[test]
fn keyboard_maps_to_buttons() {
    assert_eq!(button_for(KeyCode::Char('e')), Some(Key::Eject));
    assert_eq!(button_for(KeyCode::Char('p')), Some(Key::Prev));
    assert_eq!(button_for(KeyCode::Char('n')), Some(Key::Next));
    assert_eq!(button_for(KeyCode::Char(' ')), Some(Key::PlayPause));
    assert_eq!(button_for(KeyCode::Char('x')), None);
    assert_eq!(button_for(KeyCode::Enter), None);
}

#[test]
fn keypad_bindings_cover_every_button() {
    let keypad = TerminalKeypad::new();
    let bindings = keypad.bindings();
    let keys: Vec<Key> = bindings.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, Key::ALL.to_vec());
    assert!(bindings.iter().all(|(_, line)| !line.is_active()));
}

#[test]
fn screen_layout_shows_every_region() {
    let screen = Screen {
        header: "Playing".to_string(),
        track: "1. Come Together".to_string(),
        artist: "The Beatles".to_string(),
        album: "Abbey Road".to_string(),
        time: "01:02/04:19".to_string(),
    };
    let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();
    terminal.draw(|frame| draw(frame, &screen)).unwrap();

    let mut rendered = String::new();
    let buffer = terminal.backend().buffer();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            rendered.push_str(buffer[(x, y)].symbol());
        }
        rendered.push('\n');
    }

    for text in [
        "OSCDP",
        "Playing",
        "1. Come Together",
        "The Beatles",
        "Abbey Road",
        "01:02/04:19",
    ] {
        assert!(rendered.contains(text), "missing {text:?} in\n{rendered}");
    }
}
