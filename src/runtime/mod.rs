use std::time::Duration;

use crate::config::Settings;

mod event_loop;
mod panel;
mod settings;
mod startup;

pub use panel::run_panel;
pub use settings::load_settings;


/// Start the engine, the disc monitor and the link, then run the player
/// control loop for the life of the process.
///
/// Only a failure to start the playback engine is returned; everything
/// after that is logged and survived.
pub fn run_player(settings: &Settings) -> anyhow::Result<()> {
    let mut player = startup::start_player(settings)?;
    let tick = Duration::from_millis(settings.panel.tick_ms);

    event_loop::run(
        &mut player.orchestrator,
        &mut player.link,
        &player.events,
        tick,
    )
}
