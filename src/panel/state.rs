use std::io;

use crate::link::{DisplayCommand, Section};

/// A surface with one redrawable region per display section.
pub trait Canvas {
    fn redraw(&mut self, section: Section, content: &str) -> io::Result<()>;
}

/// Content last drawn in each region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub track: String,
    pub artist: String,
    pub album: String,
    pub time: String,
    pub player_status: String,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Track => &self.track,
            Section::Artist => &self.artist,
            Section::Album => &self.album,
            Section::Time => &self.time,
            Section::PlayerStatus => &self.player_status,
        }
    }

    fn slot_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Track => &mut self.track,
            Section::Artist => &mut self.artist,
            Section::Album => &mut self.album,
            Section::Time => &mut self.time,
            Section::PlayerStatus => &mut self.player_status,
        }
    }

    /// Apply a display command. The region is redrawn only when its content
    /// changed; returns whether a redraw happened.
    ///
    /// The cache is updated after a successful redraw, so a failed draw is
    /// retried by the next identical command.
    pub fn render<C>(&mut self, command: &DisplayCommand, canvas: &mut C) -> io::Result<bool>
    where
        C: Canvas + ?Sized,
    {
        let slot = self.slot_mut(command.section);
        if *slot == command.content {
            return Ok(false);
        }
        canvas.redraw(command.section, &command.content)?;
        slot.clone_from(&command.content);
        Ok(true)
    }
}
