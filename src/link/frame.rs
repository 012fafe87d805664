//! Frames exchanged between host and panel.
//!
//! Downstream (host to panel): `section|content\r`.
//! Upstream (panel to host): `{"event":"keypress","key":"<name>"}\n`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

pub const DISPLAY_TERMINATOR: u8 = b'\r';
pub const KEY_TERMINATOR: u8 = b'\n';

const SEPARATOR: char = '|';
const KEYPRESS_EVENT: &str = "keypress";
const NO_KEY: &str = "none";

/// Longest frame accepted before the buffer is dropped.
pub const MAX_FRAME_LEN: usize = 512;

/// Accumulates raw bytes until a terminator shows up.
///
/// Bytes after the last terminator stay buffered for the next `feed`, so
/// a frame split across reads is reassembled. A frame longer than
/// `MAX_FRAME_LEN` is dropped up to and including its terminator.
#[derive(Debug)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    terminator: u8,
    discarding: bool,
}

impl FrameDecoder {
    pub fn new(terminator: u8) -> Self {
        Self {
            buf: Vec::new(),
            terminator,
            discarding: false,
        }
    }

    /// Append `bytes` and return every completed frame, terminator stripped.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut frames = Vec::new();
        for &b in bytes {
            if b == self.terminator {
                if !self.discarding {
                    frames.push(String::from_utf8_lossy(&self.buf).into_owned());
                }
                self.buf.clear();
                self.discarding = false;
            } else if self.discarding {
                continue;
            } else if self.buf.len() == MAX_FRAME_LEN {
                tracing::debug!(limit = MAX_FRAME_LEN, "dropping oversized frame");
                self.buf.clear();
                self.discarding = true;
            } else {
                self.buf.push(b);
            }
        }
        frames
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.buf.len()
    }
}

/// Display regions of the panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    Track,
    Artist,
    Album,
    Time,
    PlayerStatus,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Track,
        Section::Artist,
        Section::Album,
        Section::Time,
        Section::PlayerStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Track => "track",
            Section::Artist => "artist",
            Section::Album => "album",
            Section::Time => "time",
            Section::PlayerStatus => "player_status",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownSection(s.to_string()))
    }
}

/// One display update for the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCommand {
    pub section: Section,
    pub content: String,
}

impl DisplayCommand {
    pub fn new(section: Section, content: impl Into<String>) -> Self {
        Self {
            section,
            content: content.into(),
        }
    }

    /// Encode as a downstream frame. Line breaks in the content are dropped
    /// so a field can never end the frame early.
    pub fn encode(&self) -> String {
        let content: String = self
            .content
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .collect();
        format!(
            "{}{}{}{}",
            self.section,
            SEPARATOR,
            content,
            DISPLAY_TERMINATOR as char
        )
    }

    /// Decode a downstream frame, with or without its terminator.
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let frame = frame
            .strip_suffix(DISPLAY_TERMINATOR as char)
            .unwrap_or(frame);
        let (section, content) = frame
            .split_once(SEPARATOR)
            .ok_or_else(|| ProtocolError::Framing(frame.to_string()))?;
        Ok(Self {
            section: section.parse()?,
            content: content.to_string(),
        })
    }
}

/// Front panel buttons.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    PlayPause,
    Next,
    Prev,
    Eject,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::PlayPause, Key::Next, Key::Prev, Key::Eject];

    pub fn name(&self) -> &'static str {
        match self {
            Key::PlayPause => "Play/Pause",
            Key::Next => "Next",
            Key::Prev => "Prev",
            Key::Eject => "Eject",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| ProtocolError::UnknownKey(s.to_string()))
    }
}

/// Upstream wire message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCommand {
    pub event: String,
    pub key: String,
}

impl KeyCommand {
    pub fn keypress(key: Key) -> Self {
        Self {
            event: KEYPRESS_EVENT.to_string(),
            key: key.name().to_string(),
        }
    }

    /// Encode as an upstream frame, newline included.
    pub fn encode(&self) -> String {
        let mut line = serde_json::json!({ "event": self.event, "key": self.key }).to_string();
        line.push(KEY_TERMINATOR as char);
        line
    }

    /// Decode an upstream line. `Ok(None)` for the `none` sentinel and for
    /// events other than key presses.
    pub fn decode(line: &str) -> Result<Option<Key>, ProtocolError> {
        let command: KeyCommand = serde_json::from_str(line.trim())?;
        if command.event != KEYPRESS_EVENT || command.key == NO_KEY {
            return Ok(None);
        }
        command.key.parse().map(Some)
    }
}
