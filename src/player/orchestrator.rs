//! The host-side control loop state machine.

use std::io::Write;
use std::sync::Arc;

use crate::disc::{self, DiscDrive};
use crate::engine::Engine;
use crate::link::{Key, PanelLink};
use crate::lookup::MetadataLookup;

use super::events::PlayerEvent;
use super::model::{PlaybackStatus, Player};

/// Owns the `Player` and applies events to it.
///
/// The engine is the source of truth for position and pause state; after
/// every event (or idle tick) `resync` pulls both back from it.
pub struct Orchestrator<E, D, L> {
    player: Player,
    engine: E,
    drive: Arc<D>,
    lookup: L,
}

impl<E, D, L> Orchestrator<E, D, L>
where
    E: Engine,
    D: DiscDrive,
    L: MetadataLookup,
{
    pub fn new(engine: E, drive: Arc<D>, lookup: L) -> Self {
        Self {
            player: Player::new(),
            engine,
            drive,
            lookup,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// One control loop iteration: apply `event` if any, resync with the
    /// engine, then push the whole view to the panel.
    pub fn step<W: Write>(&mut self, event: Option<PlayerEvent>, link: Option<&mut PanelLink<W>>) {
        if let Some(event) = event {
            self.handle_event(event);
        }
        self.resync();
        if let Some(link) = link {
            self.push_display(link);
        }
    }

    pub fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::DiscSizeChanged(size) => self.disc_size_changed(size),
            PlayerEvent::Key(key) => self.handle_key(key),
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        tracing::debug!(%key, status = self.player.status.as_str(), "handling key");
        match key {
            Key::PlayPause => self.play_pause(),
            Key::Next => {
                if let Err(e) = self.engine.next_track() {
                    tracing::warn!(error = %e, "next track failed");
                }
            }
            Key::Prev => {
                if let Err(e) = self.engine.previous_track() {
                    tracing::warn!(error = %e, "previous track failed");
                }
            }
            Key::Eject => self.eject_disc(),
        }
    }

    /// Toggle playback. The status only changes once the engine accepted
    /// the command.
    pub fn play_pause(&mut self) {
        if self.player.status == PlaybackStatus::Playing {
            match self.engine.pause() {
                Ok(()) => self.player.status = PlaybackStatus::Paused,
                Err(e) => tracing::warn!(error = %e, "pause failed"),
            }
        } else {
            match self.engine.play() {
                Ok(()) => self.player.status = PlaybackStatus::Playing,
                Err(e) => tracing::warn!(error = %e, "play failed"),
            }
        }
    }

    /// A disc size was observed. Same size as the current disc means the
    /// same disc; anything else is identified and started.
    pub fn disc_size_changed(&mut self, size: i64) {
        if self
            .player
            .disc
            .as_ref()
            .is_some_and(|disc| disc.size_bytes == size)
        {
            return;
        }

        tracing::info!(size_bytes = size, "new disc detected");
        let disc = match disc::identify(self.drive.as_ref(), &self.lookup, size) {
            Ok(disc) => disc,
            Err(e) => {
                tracing::error!(error = %e, "failed to identify disc, ejecting");
                self.eject_disc();
                return;
            }
        };

        self.player.disc = Some(disc);
        self.player.position_ms = 0;
        match self.engine.start_disc() {
            Ok(()) => self.player.status = PlaybackStatus::Playing,
            Err(e) => {
                tracing::error!(error = %e, "engine failed to start disc, ejecting");
                self.eject_disc();
            }
        }
    }

    /// Return to the pristine state and stop the engine.
    pub fn reset(&mut self) {
        if let Err(e) = self.engine.stop() {
            tracing::warn!(error = %e, "engine stop failed");
        }
        self.player.reset();
    }

    /// Reset, then open the tray.
    pub fn eject_disc(&mut self) {
        self.reset();
        if let Err(e) = self.drive.eject() {
            tracing::error!(error = %e, "eject failed");
        }
    }

    /// Pull position and pause state from the engine. Failed reads keep the
    /// previous values. Nothing is polled without a disc.
    pub fn resync(&mut self) {
        if self.player.disc.is_none() {
            return;
        }

        match self.engine.time_position_ms() {
            Ok(position) => self.player.position_ms = position,
            Err(e) => tracing::trace!(error = %e, "time position unavailable"),
        }
        match self.engine.is_playing() {
            Ok(true) => self.player.status = PlaybackStatus::Playing,
            Ok(false) => self.player.status = PlaybackStatus::Paused,
            Err(e) => tracing::trace!(error = %e, "pause state unavailable"),
        }
    }

    /// Write the full view to the panel. Write failures are logged only.
    pub fn push_display<W: Write>(&self, link: &mut PanelLink<W>) {
        for command in self.player.display_commands() {
            if let Err(e) = link.write_command(&command) {
                tracing::warn!(error = %e, section = %command.section, "display update failed");
                return;
            }
        }
    }
}
