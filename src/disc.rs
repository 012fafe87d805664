//! Disc model and the optical drive collaborators.
//!
//! `model` and `toc` are pure value code. `drive` shells out to the system
//! tools, `monitor` polls the drive for a new medium and `identify` ties TOC
//! reading and metadata lookup together.

mod drive;
mod id;
mod identify;
mod model;
mod monitor;
mod toc;

pub use drive::{BlockDeviceDrive, DiscDrive, toc_from_cdparanoia};
pub use id::musicbrainz_disc_id;
pub use identify::identify;
pub use model::*;
pub use monitor::spawn_size_monitor;
pub use toc::{FRAMES_PER_SECOND, MAX_TRACKS, Toc, frames_to_ms};
