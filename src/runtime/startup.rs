use std::fs::File;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::Context;

use crate::config::{LinkSettings, Settings};
use crate::disc::{BlockDeviceDrive, spawn_size_monitor};
use crate::engine::Mpv;
use crate::link::{PanelLink, open_serial, spawn_key_listener};
use crate::lookup::{MetadataLookup, MusicBrainz, NoLookup};
use crate::player::{Orchestrator, PlayerEvent};

pub type PlayerOrchestrator = Orchestrator<Mpv, BlockDeviceDrive, Box<dyn MetadataLookup>>;

/// Everything the player control loop runs on.
pub struct PlayerRuntime {
    pub orchestrator: PlayerOrchestrator,
    pub link: Option<PanelLink<File>>,
    pub events: Receiver<PlayerEvent>,
}

pub fn start_player(settings: &Settings) -> anyhow::Result<PlayerRuntime> {
    let engine = Mpv::spawn(&settings.engine).context("failed to start playback engine")?;
    tracing::info!(socket = %settings.engine.socket_path, "playback engine ready");

    let lookup: Box<dyn MetadataLookup> = if settings.lookup.enabled {
        Box::new(MusicBrainz::new(&settings.lookup))
    } else {
        tracing::info!("metadata lookup disabled");
        Box::new(NoLookup)
    };

    let (tx, rx) = mpsc::channel::<PlayerEvent>();

    let drive = Arc::new(BlockDeviceDrive::new(&settings.disc));
    spawn_size_monitor(
        Arc::clone(&drive),
        Duration::from_millis(settings.disc.poll_interval_ms),
        tx.clone(),
    );

    let link = open_link(&settings.link, tx);

    Ok(PlayerRuntime {
        orchestrator: Orchestrator::new(engine, drive, lookup),
        link,
        events: rx,
    })
}

/// Open the panel link and start listening for keys on it. Without a panel
/// the player keeps running headless.
fn open_link(settings: &LinkSettings, tx: Sender<PlayerEvent>) -> Option<PanelLink<File>> {
    let port = match open_serial(settings) {
        Ok(port) => port,
        Err(e) => {
            tracing::warn!(error = %e, "panel link unavailable, running headless");
            return None;
        }
    };

    match port.try_clone() {
        Ok(reader) => {
            spawn_key_listener(reader, tx);
        }
        Err(e) => tracing::warn!(error = %e, "cannot read keys from panel link"),
    }

    match PanelLink::open(port, Duration::from_millis(settings.write_gap_ms)) {
        Ok(link) => {
            tracing::info!(device = %settings.device, "panel link open");
            Some(link)
        }
        Err(e) => {
            tracing::warn!(error = %e, "panel link write failed, running headless");
            None
        }
    }
}
