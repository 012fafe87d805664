use std::io::Write;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::disc::DiscDrive;
use crate::engine::Engine;
use crate::link::PanelLink;
use crate::lookup::MetadataLookup;
use crate::player::{Orchestrator, PlayerEvent};

/// Take at most one pending event without blocking. Sleeps for `tick` when
/// there is nothing to do.
pub(super) fn next_event(
    events: &Receiver<PlayerEvent>,
    tick: Duration,
) -> Option<PlayerEvent> {
    match events.try_recv() {
        Ok(event) => Some(event),
        // With every producer gone the loop still resyncs and redraws.
        Err(TryRecvError::Empty | TryRecvError::Disconnected) => {
            thread::sleep(tick);
            None
        }
    }
}

/// Player control loop. One event per iteration, then resync and redraw.
pub fn run<E, D, L, W>(
    orchestrator: &mut Orchestrator<E, D, L>,
    link: &mut Option<PanelLink<W>>,
    events: &Receiver<PlayerEvent>,
    tick: Duration,
) -> !
where
    E: Engine,
    D: DiscDrive,
    L: MetadataLookup,
    W: Write,
{
    loop {
        let event = next_event(events, tick);
        orchestrator.step(event, link.as_mut());
    }
}
