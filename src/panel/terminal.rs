//! Terminal stand-in for the front panel.
//!
//! The screen is drawn with `ratatui` in the layout of the physical
//! display, and the keyboard plays the four buttons.

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::link::{Key, Section};

use super::keys::KeyLine;
use super::state::Canvas;

const TITLE: &str = " OSCDP ";

/// Button cues in button order, left to right.
const BUTTON_CUES: [(&str, Color); 4] = [
    ("⏏", Color::Cyan),
    ("⏮", Color::Yellow),
    ("⏭", Color::Magenta),
    ("⏯", Color::Green),
];

/// Everything the terminal panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub header: String,
    pub track: String,
    pub artist: String,
    pub album: String,
    pub time: String,
}

impl Screen {
    fn set(&mut self, section: Section, content: &str) {
        let slot = match section {
            Section::PlayerStatus => &mut self.header,
            Section::Track => &mut self.track,
            Section::Artist => &mut self.artist,
            Section::Album => &mut self.album,
            Section::Time => &mut self.time,
        };
        content.clone_into(slot);
    }
}

fn text_row(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).block(Block::default().padding(Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }))
}

/// Render `screen` into `frame`.
pub fn draw(frame: &mut Frame, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(screen.header.as_str())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::Black).bg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(TITLE)
                .title_style(Style::default().add_modifier(Modifier::BOLD))
                .title_alignment(Alignment::Left),
        );
    frame.render_widget(header, chunks[0]);

    frame.render_widget(text_row(&screen.track), chunks[1]);
    frame.render_widget(text_row(&screen.artist), chunks[2]);
    frame.render_widget(text_row(&screen.album), chunks[3]);

    let time = Paragraph::new(screen.time.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().padding(Padding {
            left: 0,
            right: 0,
            top: 1,
            bottom: 0,
        }));
    frame.render_widget(time, chunks[4]);

    let mut cues = Vec::with_capacity(BUTTON_CUES.len() * 2);
    for (i, (glyph, color)) in BUTTON_CUES.iter().enumerate() {
        if i > 0 {
            cues.push(Span::raw(" "));
        }
        cues.push(Span::styled(*glyph, Style::default().fg(*color)));
    }
    let cue_line = Paragraph::new(Line::from(cues))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(cue_line, chunks[6]);
}

/// The panel display drawn on the controlling terminal.
pub struct TerminalCanvas {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    screen: Screen,
}

impl TerminalCanvas {
    /// Switch the terminal to raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            screen: Screen::default(),
        })
    }

    /// Restore the terminal. Call once the panel loop is over.
    pub fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn redraw(&mut self, section: Section, content: &str) -> io::Result<()> {
        self.screen.set(section, content);
        self.terminal.draw(|frame| draw(frame, &self.screen))?;
        Ok(())
    }
}

/// Keyboard key standing in for a panel button.
pub fn button_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('e') => Some(Key::Eject),
        KeyCode::Char('p') => Some(Key::Prev),
        KeyCode::Char('n') => Some(Key::Next),
        KeyCode::Char(' ') => Some(Key::PlayPause),
        _ => None,
    }
}

/// Keyboard buttons. A line reads active for the tick in which its key was
/// pressed.
#[derive(Default)]
pub struct TerminalKeypad {
    pressed: Rc<RefCell<Vec<Key>>>,
}

struct KeypadLine {
    key: Key,
    pressed: Rc<RefCell<Vec<Key>>>,
}

impl KeyLine for KeypadLine {
    fn is_active(&self) -> bool {
        self.pressed.borrow().contains(&self.key)
    }
}

impl TerminalKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// One line per button, for `KeyScanner`.
    pub fn bindings(&self) -> Vec<(Key, Box<dyn KeyLine>)> {
        Key::ALL
            .into_iter()
            .map(|key| {
                let line: Box<dyn KeyLine> = Box::new(KeypadLine {
                    key,
                    pressed: Rc::clone(&self.pressed),
                });
                (key, line)
            })
            .collect()
    }

    /// Collect the key presses of one tick, waiting up to `tick` for the
    /// first event. Returns `false` once `q` or Esc asks the panel to quit.
    pub fn poll(&mut self, tick: Duration) -> io::Result<bool> {
        let mut pressed = self.pressed.borrow_mut();
        pressed.clear();

        let mut wait = tick;
        while event::poll(wait)? {
            wait = Duration::ZERO;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
                code => {
                    if let Some(button) = button_for(code) {
                        pressed.push(button);
                    }
                }
            }
        }
        Ok(true)
    }
}
