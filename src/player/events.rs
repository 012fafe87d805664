use crate::link::Key;

/// Inputs merged into the player's control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The drive reports a medium of this many bytes.
    DiscSizeChanged(i64),
    /// A button was pressed on the panel.
    Key(Key),
}
