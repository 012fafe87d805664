//! Open source CD player.
//!
//! The host side (`player`) drives an mpv process to play an audio CD and
//! reports what it plays to a front panel over a serial link. The panel side
//! (`panel`) shows that state and sends button presses back.

pub mod config;
pub mod disc;
pub mod engine;
pub mod error;
pub mod link;
pub mod logging;
pub mod lookup;
pub mod panel;
pub mod player;
pub mod runtime;
