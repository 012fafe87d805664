//! Both ends of the link.
//!
//! The host writes display frames and listens for key events; the panel
//! does the opposite. Each side reads on its own thread and forwards
//! decoded messages to a channel.

use std::io::{ErrorKind, Read, Write};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::LinkError;
use crate::player::PlayerEvent;

use super::frame::{
    DISPLAY_TERMINATOR, DisplayCommand, FrameDecoder, KEY_TERMINATOR, Key, KeyCommand, Section,
};

const READ_CHUNK: usize = 64;

/// Read `reader` until EOF or error, handing each completed frame to
/// `on_frame`. Stops early when `on_frame` returns `false`.
pub fn read_frames<R, F>(mut reader: R, terminator: u8, mut on_frame: F)
where
    R: Read,
    F: FnMut(&str) -> bool,
{
    let mut decoder = FrameDecoder::new(terminator);
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => {
                tracing::info!("link closed");
                return;
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::error!(error = %e, "link read failed");
                return;
            }
        };
        for frame in decoder.feed(&chunk[..n]) {
            if !on_frame(&frame) {
                return;
            }
        }
    }
}

/// Host end: pushes display updates to the panel.
pub struct PanelLink<W> {
    writer: W,
    write_gap: Duration,
}

impl<W: Write> PanelLink<W> {
    pub fn new(writer: W, write_gap: Duration) -> Self {
        Self { writer, write_gap }
    }

    /// Create the link and announce the player to the panel.
    pub fn open(writer: W, write_gap: Duration) -> Result<Self, LinkError> {
        let mut link = Self::new(writer, write_gap);
        link.write_command(&DisplayCommand::new(Section::PlayerStatus, "Player OK"))?;
        Ok(link)
    }

    pub fn write_command(&mut self, command: &DisplayCommand) -> Result<(), LinkError> {
        self.writer.write_all(command.encode().as_bytes())?;
        self.writer.flush()?;
        // The panel drains its UART slowly; give it a moment between frames.
        if !self.write_gap.is_zero() {
            thread::sleep(self.write_gap);
        }
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

/// Forward key presses read from the panel as `PlayerEvent::Key`.
///
/// Malformed lines and unknown keys are logged and skipped.
pub fn spawn_key_listener<R>(reader: R, tx: Sender<PlayerEvent>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        read_frames(reader, KEY_TERMINATOR, |line| {
            match KeyCommand::decode(line) {
                Ok(Some(key)) => {
                    tracing::debug!(%key, "key pressed on panel");
                    return tx.send(PlayerEvent::Key(key)).is_ok();
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, line = %line.trim(), "error parsing key command"),
            }
            true
        });
    })
}

/// Panel end: reports key presses to the host.
pub struct HostLink<W> {
    writer: W,
}

impl<W: Write> HostLink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn send_key(&mut self, key: Key) -> Result<(), LinkError> {
        self.writer
            .write_all(KeyCommand::keypress(key).encode().as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

/// Forward display commands read from the host.
///
/// Frames that do not split into section and content are dropped quietly:
/// a missed redraw is harmless.
pub fn spawn_display_listener<R>(reader: R, tx: Sender<DisplayCommand>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        read_frames(reader, DISPLAY_TERMINATOR, |frame| {
            match DisplayCommand::decode(frame) {
                Ok(command) => return tx.send(command).is_ok(),
                Err(e) => tracing::debug!(error = %e, "discarding display frame"),
            }
            true
        });
    })
}
