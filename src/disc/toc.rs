//! Table-of-contents parsing.
//!
//! A descriptor looks like `first last lead_out start_1 .. start_N`, all in
//! CD frames (75 per second).

use crate::error::TocError;

use super::model::{Disc, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST};

pub const FRAMES_PER_SECOND: i64 = 75;

/// Audio CDs carry at most 99 tracks.
pub const MAX_TRACKS: u32 = 99;

/// A parsed TOC descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    pub first_track: u32,
    pub last_track: u32,
    pub lead_out: i64,
    pub start_frames: Vec<i64>,
}

/// Frames are read as `u32`, so every value fits the 8 hex digits of the
/// disc id and `frames * 1000` cannot overflow.
fn parse_frame(field: &str, value: &str) -> Result<i64, TocError> {
    parse_field::<u32>(field, value).map(i64::from)
}

/// Convert CD frames to milliseconds, truncating.
pub fn frames_to_ms(frames: i64) -> i64 {
    frames * 1000 / FRAMES_PER_SECOND
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, TocError> {
    value
        .parse::<T>()
        .map_err(|_| TocError::invalid_field(field, value))
}

impl Toc {
    pub fn parse(descriptor: &str) -> Result<Self, TocError> {
        let parts: Vec<&str> = descriptor.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(TocError::Malformed(format!(
                "expected at least 3 fields but got {}",
                parts.len()
            )));
        }

        let first_track: u32 = parse_field("first track", parts[0])?;
        let last_track: u32 = parse_field("last track", parts[1])?;
        let lead_out = parse_frame("lead-out", parts[2])?;

        let count = last_track
            .checked_sub(first_track)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| {
                TocError::Malformed(format!(
                    "invalid track range {first_track}..={last_track}"
                ))
            })?;
        if count > MAX_TRACKS {
            return Err(TocError::Malformed(format!(
                "{count} tracks exceed the limit of {MAX_TRACKS}"
            )));
        }

        let expected = count as usize;
        let frames = &parts[3..];
        if frames.len() != expected {
            return Err(TocError::Malformed(format!(
                "expected {expected} start frames but got {}",
                frames.len()
            )));
        }

        let start_frames = frames
            .iter()
            .enumerate()
            .map(|(i, f)| parse_frame(&format!("start frame {}", i + 1), f))
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(Self {
            first_track,
            last_track,
            lead_out,
            start_frames,
        })
    }

    pub fn track_count(&self) -> usize {
        self.start_frames.len()
    }

    /// Per-track `(begin, end)` frames; each track ends where the next begins,
    /// the last one at the lead-out.
    pub fn boundaries(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.start_frames.iter().enumerate().map(|(i, &begin)| {
            let end = self
                .start_frames
                .get(i + 1)
                .copied()
                .unwrap_or(self.lead_out);
            (begin, end)
        })
    }

    /// Build a disc with placeholder metadata from this TOC.
    pub fn to_disc(&self, size_bytes: i64) -> Disc {
        let tracks = self
            .boundaries()
            .enumerate()
            .map(|(i, (begin, end))| {
                let number = self.first_track + i as u32;
                Track {
                    title: format!("Track {number}"),
                    number: number.to_string(),
                    offset_ms: frames_to_ms(begin),
                    length_ms: (end - begin) * 1000 / FRAMES_PER_SECOND,
                }
            })
            .collect();

        Disc {
            artist: UNKNOWN_ARTIST.to_string(),
            title: UNKNOWN_ALBUM.to_string(),
            tracks,
            size_bytes,
        }
    }
}

impl Disc {
    /// Parse `descriptor` and build a disc with placeholder metadata.
    pub fn from_toc(descriptor: &str, size_bytes: i64) -> Result<Disc, TocError> {
        Ok(Toc::parse(descriptor)?.to_disc(size_bytes))
    }
}
