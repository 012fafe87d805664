use crate::error::DiscError;
use crate::lookup::MetadataLookup;

use super::drive::DiscDrive;
use super::id::musicbrainz_disc_id;
use super::model::Disc;
use super::toc::Toc;

/// Read the TOC of the inserted disc and name it.
///
/// A failed TOC read is an error (the caller ejects the disc). A failed or
/// empty metadata lookup is not: the disc keeps its placeholder labels.
pub fn identify<D, L>(drive: &D, lookup: &L, size_bytes: i64) -> Result<Disc, DiscError>
where
    D: DiscDrive + ?Sized,
    L: MetadataLookup + ?Sized,
{
    let descriptor = drive.read_toc()?;
    let toc = Toc::parse(&descriptor)?;
    let disc = toc.to_disc(size_bytes);

    let disc_id = musicbrainz_disc_id(&toc);
    tracing::info!(
        disc_id = %disc_id,
        tracks = disc.tracks.len(),
        size_bytes,
        "disc TOC read"
    );

    match lookup.lookup(&disc_id) {
        Ok(Some(metadata)) => {
            let disc = disc.with_metadata(&metadata);
            tracing::info!(artist = %disc.artist, album = %disc.title, "disc identified");
            Ok(disc)
        }
        Ok(None) => {
            tracing::info!(disc_id = %disc_id, "no metadata for disc");
            Ok(disc)
        }
        Err(e) => {
            tracing::warn!(error = %e, disc_id = %disc_id, "failed to get disc info");
            Ok(disc)
        }
    }
}
