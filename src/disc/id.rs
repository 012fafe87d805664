use base64::{Engine, engine::general_purpose::STANDARD};
use sha1::{Digest, Sha1};

use super::toc::{MAX_TRACKS, Toc};

const SLOTS: usize = MAX_TRACKS as usize;

/// Compute the MusicBrainz disc identifier for `toc`.
///
/// The hash input is the hex rendering of first/last track, the lead-out and
/// 99 track offsets (indexed by track number, zero-filled). The base64 output
/// swaps `+/=` for `._-` so the id is URL-safe.
pub fn musicbrainz_disc_id(toc: &Toc) -> String {
    let mut offsets = [0i64; SLOTS + 1];
    offsets[0] = toc.lead_out;
    for (i, &frame) in toc.start_frames.iter().enumerate() {
        let slot = toc.first_track as usize + i;
        if slot <= SLOTS {
            offsets[slot] = frame;
        }
    }

    let mut input = format!("{:02X}{:02X}", toc.first_track, toc.last_track);
    for offset in offsets {
        input.push_str(&format!("{:08X}", offset));
    }

    let digest = Sha1::digest(input.as_bytes());
    STANDARD
        .encode(digest)
        .chars()
        .map(|c| match c {
            '+' => '.',
            '/' => '_',
            '=' => '-',
            other => other,
        })
        .collect()
}
