//! Panel side of the link.
//!
//! The panel mirrors the host's view of the player. `DisplayState` caches
//! what each region shows so repeated frames cost nothing, `KeyScanner`
//! turns button lines into debounced presses, and `Panel` runs both on one
//! tick. `terminal` provides a keyboard and ratatui stand-in for the real
//! buttons and screen.

mod keys;
mod runner;
mod state;
mod terminal;

pub use keys::{DEFAULT_DEBOUNCE, KeyLine, KeyScanner};
pub use runner::{Panel, SPLASH_GLYPH, VERSION_BANNER};
pub use state::{Canvas, DisplayState};
pub use terminal::{Screen, TerminalCanvas, TerminalKeypad, button_for, draw};

#[cfg(test)]
mod tests;
