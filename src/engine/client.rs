use std::io::{BufRead, BufReader, Read, Write};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::EngineError;

use super::Engine;
use super::protocol::{self, EngineResponse, Incoming};

/// Request/response client over one duplex byte stream.
///
/// Replies carry no correlation id, so the stream sits behind a mutex: the
/// request is written and its reply read while the lock is held, which keeps
/// exactly one request in flight.
#[derive(Debug)]
pub struct EngineClient<S> {
    connection: Mutex<BufReader<S>>,
}

impl<S: Read + Write> EngineClient<S> {
    pub fn new(stream: S) -> Self {
        Self {
            connection: Mutex::new(BufReader::new(stream)),
        }
    }

    /// Send `command` and wait for its reply.
    pub fn request(&self, command: &Value) -> Result<EngineResponse, EngineError> {
        let line = protocol::encode_request(command);
        let mut conn = self
            .connection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        {
            let stream = conn.get_mut();
            stream.write_all(line.as_bytes())?;
            stream.flush()?;
        }
        tracing::trace!(request = %line.trim_end(), "engine request");

        let mut buf = String::new();
        loop {
            buf.clear();
            if conn.read_line(&mut buf)? == 0 {
                return Err(EngineError::Closed);
            }
            let reply = buf.trim();
            if reply.is_empty() {
                continue;
            }
            match protocol::parse_line(reply)? {
                Incoming::Reply(response) => {
                    tracing::trace!(response = %reply, "engine response");
                    return Ok(response);
                }
                Incoming::Event(name) => {
                    tracing::trace!(event = %name, "skipping engine event");
                }
            }
        }
    }

    /// Send `command` and require the engine to accept it.
    pub fn command(&self, command: &Value) -> Result<(), EngineError> {
        let response = self.request(command)?;
        if response.is_success() {
            Ok(())
        } else {
            Err(EngineError::Rejected(response.error))
        }
    }

    fn property(&self, name: &str) -> Result<Value, EngineError> {
        let response = self.request(&protocol::get_property(name))?;
        if !response.is_success() {
            return Err(EngineError::Rejected(response.error));
        }
        Ok(response.data)
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> S {
        self.connection
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .into_inner()
    }
}

fn unexpected(property: &str, value: &Value) -> EngineError {
    EngineError::UnexpectedResponseType {
        property: property.to_string(),
        found: protocol::value_kind(value).to_string(),
    }
}

impl<S: Read + Write> Engine for EngineClient<S> {
    fn stop(&self) -> Result<(), EngineError> {
        self.command(&protocol::stop())
    }

    fn next_track(&self) -> Result<(), EngineError> {
        self.command(&protocol::chapter_step(1))
    }

    fn previous_track(&self) -> Result<(), EngineError> {
        self.command(&protocol::chapter_step(-1))
    }

    fn start_disc(&self) -> Result<(), EngineError> {
        self.command(&protocol::load_disc())
    }

    fn play(&self) -> Result<(), EngineError> {
        self.command(&protocol::set_pause(false))
    }

    fn pause(&self) -> Result<(), EngineError> {
        self.command(&protocol::set_pause(true))
    }

    fn time_position_ms(&self) -> Result<i64, EngineError> {
        let data = self.property("time-pos")?;
        let seconds = data.as_f64().ok_or_else(|| unexpected("time-pos", &data))?;
        Ok((seconds * 1000.0) as i64)
    }

    fn is_playing(&self) -> Result<bool, EngineError> {
        let data = self.property("pause")?;
        let paused = data.as_bool().ok_or_else(|| unexpected("pause", &data))?;
        Ok(!paused)
    }
}
