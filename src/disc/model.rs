use crate::lookup::DiscMetadata;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// One audio track with its disc-relative time boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    /// Track number as printed on the panel (`"3"` renders as `3. Title`).
    pub number: String,
    pub offset_ms: i64,
    pub length_ms: i64,
}

/// A disc in the drive.
///
/// `size_bytes` doubles as the disc identity: a different size means a
/// physically different disc. Two discs of identical size are
/// indistinguishable, which is an accepted approximation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disc {
    pub artist: String,
    pub title: String,
    pub tracks: Vec<Track>,
    pub size_bytes: i64,
}

impl Disc {
    /// Build a copy of this disc with the looked-up metadata applied.
    ///
    /// Fields missing from `metadata` keep their placeholder values, and
    /// extra track titles beyond the TOC are ignored.
    pub fn with_metadata(&self, metadata: &DiscMetadata) -> Disc {
        let mut disc = self.clone();
        if let Some(title) = metadata.title.as_deref().filter(|t| !t.is_empty()) {
            disc.title = title.to_string();
        }
        if let Some(artist) = metadata.artist.as_deref().filter(|a| !a.is_empty()) {
            disc.artist = artist.to_string();
        }
        for (track, title) in disc.tracks.iter_mut().zip(&metadata.track_titles) {
            track.title = title.clone();
        }
        disc
    }
}
