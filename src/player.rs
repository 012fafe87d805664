//! Player state machine.
//!
//! `model` holds the state and the views derived from it (current track,
//! time string, display frames). `orchestrator` owns that state and applies
//! disc changes, key presses and engine resyncs to it.

mod events;
mod model;
mod orchestrator;

pub use events::PlayerEvent;
pub use model::*;
pub use orchestrator::Orchestrator;
