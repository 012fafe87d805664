use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::PanelSettings;
use crate::link::{DisplayCommand, HostLink, Section};

use super::keys::KeyScanner;
use super::state::{Canvas, DisplayState};

pub const VERSION_BANNER: &str = "v0.1";
pub const SPLASH_GLYPH: &str = "☺";

/// The panel control loop: buttons go up the link, display commands come
/// down and are rendered.
pub struct Panel<C, W> {
    canvas: C,
    state: DisplayState,
    scanner: KeyScanner,
    host: HostLink<W>,
    commands: Receiver<DisplayCommand>,
}

impl<C: Canvas, W: Write> Panel<C, W> {
    pub fn new(
        canvas: C,
        scanner: KeyScanner,
        host: HostLink<W>,
        commands: Receiver<DisplayCommand>,
    ) -> Self {
        Self {
            canvas,
            state: DisplayState::new(),
            scanner,
            host,
            commands,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn host(&self) -> &HostLink<W> {
        &self.host
    }

    /// Version banner, then the glyph, then the waiting text until the
    /// player speaks. The first two each hold for `splash_ms`.
    ///
    /// Drawn straight on the canvas: the first status frame from the player
    /// must still count as a change.
    pub fn show_startup(&mut self, settings: &PanelSettings) -> io::Result<()> {
        for splash in [VERSION_BANNER, SPLASH_GLYPH] {
            self.canvas.redraw(Section::PlayerStatus, splash)?;
            if settings.splash_ms > 0 {
                thread::sleep(Duration::from_millis(settings.splash_ms));
            }
        }
        self.canvas
            .redraw(Section::PlayerStatus, &settings.waiting_text)
    }

    pub fn tick(&mut self) -> io::Result<()> {
        self.tick_at(Instant::now())
    }

    /// Report this tick's key presses, then render every pending command.
    pub fn tick_at(&mut self, now: Instant) -> io::Result<()> {
        for key in self.scanner.scan_at(now) {
            tracing::debug!(%key, "button pressed");
            if let Err(e) = self.host.send_key(key) {
                tracing::warn!(error = %e, %key, "failed to send key press");
            }
        }

        while let Ok(command) = self.commands.try_recv() {
            self.state.render(&command, &mut self.canvas)?;
        }
        Ok(())
    }
}
