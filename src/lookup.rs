//! Disc metadata lookup.
//!
//! The player only needs album title, artist and track titles for a disc
//! identifier. A lookup failure never stops playback; the caller falls back
//! to placeholder labels.

mod musicbrainz;

pub use musicbrainz::{MusicBrainz, parse_discid_response};

use crate::error::LookupError;

/// Metadata found for a disc. Absent fields keep their placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub track_titles: Vec<String>,
}

pub trait MetadataLookup {
    /// Look up `disc_id`; `Ok(None)` when the service knows no release.
    fn lookup(&self, disc_id: &str) -> Result<Option<DiscMetadata>, LookupError>;
}

/// Lookup used when the metadata service is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl MetadataLookup for NoLookup {
    fn lookup(&self, _disc_id: &str) -> Result<Option<DiscMetadata>, LookupError> {
        Ok(None)
    }
}

impl<T: MetadataLookup + ?Sized> MetadataLookup for Box<T> {
    fn lookup(&self, disc_id: &str) -> Result<Option<DiscMetadata>, LookupError> {
        (**self).lookup(disc_id)
    }
}
