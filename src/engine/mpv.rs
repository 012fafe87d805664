//! The mpv process acting as playback engine.

use std::os::unix::net::UnixStream;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::EngineSettings;
use crate::error::EngineError;

use super::Engine;
use super::client::EngineClient;

const CONNECT_RETRY: Duration = Duration::from_millis(100);

/// Handle to the engine process and its IPC connection.
#[derive(Debug)]
pub struct Mpv {
    process: Child,
    socket_path: String,
    client: EngineClient<UnixStream>,
}

impl Mpv {
    /// Spawn the engine idle and connect once its socket accepts connections.
    pub fn spawn(settings: &EngineSettings) -> Result<Self, EngineError> {
        let socket_path = settings.socket_path.clone();
        // A socket left over from a previous run would be dialed before the
        // new engine is listening.
        if Path::new(&socket_path).exists() {
            let _ = std::fs::remove_file(&socket_path);
        }

        let mut cmd = Command::new(&settings.binary);
        cmd.args(&settings.args)
            .arg("--idle")
            .arg(format!("--input-ipc-server={}", socket_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        tracing::info!(binary = %settings.binary, socket = %socket_path, "spawning playback engine");
        let mut process = cmd.spawn().map_err(|source| EngineError::Spawn {
            binary: settings.binary.clone(),
            source,
        })?;

        let timeout = Duration::from_millis(settings.ready_timeout_ms);
        let stream = match wait_for_socket(&mut process, &socket_path, timeout) {
            Ok(stream) => stream,
            Err(e) => {
                let _ = process.kill();
                let _ = process.wait();
                return Err(e);
            }
        };
        tracing::info!(socket = %socket_path, "connected to playback engine");

        Ok(Self {
            process,
            socket_path,
            client: EngineClient::new(stream),
        })
    }
}

fn wait_for_socket(
    process: &mut Child,
    socket_path: &str,
    timeout: Duration,
) -> Result<UnixStream, EngineError> {
    let deadline = Instant::now() + timeout;
    loop {
        match UnixStream::connect(socket_path) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                if let Ok(Some(status)) = process.try_wait() {
                    tracing::error!(%status, "playback engine exited during startup");
                    return Err(EngineError::NotReady(socket_path.to_string()));
                }
                if Instant::now() >= deadline {
                    tracing::error!(error = %e, "playback engine socket never became ready");
                    return Err(EngineError::NotReady(socket_path.to_string()));
                }
                thread::sleep(CONNECT_RETRY);
            }
        }
    }
}

impl Drop for Mpv {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

impl Engine for Mpv {
    fn stop(&self) -> Result<(), EngineError> {
        self.client.stop()
    }

    fn next_track(&self) -> Result<(), EngineError> {
        self.client.next_track()
    }

    fn previous_track(&self) -> Result<(), EngineError> {
        self.client.previous_track()
    }

    fn start_disc(&self) -> Result<(), EngineError> {
        self.client.start_disc()
    }

    fn play(&self) -> Result<(), EngineError> {
        self.client.play()
    }

    fn pause(&self) -> Result<(), EngineError> {
        self.client.pause()
    }

    fn time_position_ms(&self) -> Result<i64, EngineError> {
        self.client.time_position_ms()
    }

    fn is_playing(&self) -> Result<bool, EngineError> {
        self.client.is_playing()
    }
}
