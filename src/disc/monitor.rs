use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::player::PlayerEvent;

use super::drive::DiscDrive;

/// Poll the drive size on a fixed interval and forward every positive
/// reading. The orchestrator decides whether the size means a new disc.
///
/// The thread ends once the receiving side is gone.
pub fn spawn_size_monitor<D>(
    drive: Arc<D>,
    interval: Duration,
    tx: Sender<PlayerEvent>,
) -> JoinHandle<()>
where
    D: DiscDrive + Send + Sync + 'static,
{
    thread::spawn(move || {
        loop {
            match drive.size() {
                Ok(size) if size > 0 => {
                    if tx.send(PlayerEvent::DiscSizeChanged(size)).is_err() {
                        tracing::debug!("disc monitor shutting down");
                        return;
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::trace!(error = %e, "no readable disc"),
            }
            thread::sleep(interval);
        }
    })
}
