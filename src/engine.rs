//! Playback engine control.
//!
//! The engine is an external mpv process driven over its JSON IPC socket.
//! `Engine` is the set of operations the player uses; `EngineClient` speaks
//! the protocol over any byte stream and `Mpv` owns the real process.

mod client;
mod mpv;
pub mod protocol;

pub use client::EngineClient;
pub use mpv::Mpv;
pub use protocol::EngineResponse;

use crate::error::EngineError;

/// Operations offered by the playback engine.
///
/// Every call is one request/response round-trip; failures are returned to
/// the caller and never retried.
pub trait Engine {
    fn stop(&self) -> Result<(), EngineError>;
    fn next_track(&self) -> Result<(), EngineError>;
    fn previous_track(&self) -> Result<(), EngineError>;
    /// Load the physical disc as the media source.
    fn start_disc(&self) -> Result<(), EngineError>;
    fn play(&self) -> Result<(), EngineError>;
    fn pause(&self) -> Result<(), EngineError>;
    fn time_position_ms(&self) -> Result<i64, EngineError>;
    fn is_playing(&self) -> Result<bool, EngineError>;
}

#[cfg(test)]
mod tests;
