//! Serial link between the host and the front panel.
//!
//! Two independent sub-protocols share one byte stream: display updates go
//! downstream, key presses come back upstream. Both are terminator framed and
//! both treat malformed input as something to skip rather than fail on.

mod endpoint;
mod frame;
mod serial;

pub use endpoint::{
    HostLink, PanelLink, read_frames, spawn_display_listener, spawn_key_listener,
};
pub use frame::*;
pub use serial::open_serial;

#[cfg(test)]
mod tests;
