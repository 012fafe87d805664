//! Player state and the pure views derived from it.

use crate::disc::{Disc, Track};
use crate::link::{DisplayCommand, Section};

/// How early a track is considered current, to cover the engine's chapter
/// switch landing slightly before the TOC offset.
pub const TRACK_LEAD_IN_MS: i64 = 2500;

const EMPTY_TIME: &str = "00:00/00:00";

/// The playback state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }
}

/// The player as seen by the orchestrator. Only the control loop mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub disc: Option<Disc>,
    pub position_ms: i64,
    pub status: PlaybackStatus,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the disc and return to the pristine state.
    pub fn reset(&mut self) {
        self.disc = None;
        self.position_ms = 0;
        self.status = PlaybackStatus::Stopped;
    }

    /// The track whose window `[offset - lead-in, offset + length - lead-in)`
    /// contains the current position.
    pub fn current_track(&self) -> Option<&Track> {
        let disc = self.disc.as_ref()?;
        disc.tracks.iter().find(|track| {
            let start = track.offset_ms - TRACK_LEAD_IN_MS;
            let end = track.offset_ms + track.length_ms - TRACK_LEAD_IN_MS;
            (start..end).contains(&self.position_ms)
        })
    }

    /// Position within the current track against its length, `MM:SS/MM:SS`.
    pub fn pretty_position(&self) -> String {
        match self.current_track() {
            Some(track) => format_track_time(self.position_ms - track.offset_ms, track.length_ms),
            None => EMPTY_TIME.to_string(),
        }
    }

    /// The full set of display updates describing this player.
    pub fn display_commands(&self) -> Vec<DisplayCommand> {
        let Some(disc) = &self.disc else {
            return vec![
                DisplayCommand::new(Section::PlayerStatus, "No Disc"),
                DisplayCommand::new(Section::Time, ""),
                DisplayCommand::new(Section::Album, ""),
                DisplayCommand::new(Section::Artist, ""),
                DisplayCommand::new(Section::Track, ""),
            ];
        };

        let mut commands = vec![
            DisplayCommand::new(Section::PlayerStatus, self.status.as_str()),
            DisplayCommand::new(Section::Album, disc.title.as_str()),
            DisplayCommand::new(Section::Artist, disc.artist.as_str()),
            DisplayCommand::new(Section::Time, self.pretty_position()),
        ];
        if let Some(track) = self.current_track() {
            commands.push(DisplayCommand::new(
                Section::Track,
                format!("{}. {}", track.number, track.title),
            ));
        }
        commands
    }
}

/// Format a track-relative position and a track length.
///
/// Negative seconds are clamped to zero; negative minutes are printed as-is
/// (only reachable more than a minute before the track offset).
pub fn format_track_time(track_position_ms: i64, length_ms: i64) -> String {
    let minutes = track_position_ms / 60_000;
    let seconds = ((track_position_ms / 1000) % 60).max(0);
    let track_minutes = length_ms / 60_000;
    let track_seconds = (length_ms / 1000) % 60;
    format!("{minutes:02}:{seconds:02}/{track_minutes:02}:{track_seconds:02}")
}
