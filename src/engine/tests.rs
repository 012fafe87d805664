use std::io::{self, Cursor, Read, Write};
use std::time::{Duration, Instant};

use super::protocol::{self, Incoming};
use super::*;
use crate::config::EngineSettings;
use crate::error::EngineError;

/// A byte stream with scripted replies that records what was written.
struct ScriptedStream {
    replies: Cursor<Vec<u8>>,
    sent: Vec<u8>,
}

impl ScriptedStream {
    fn new(replies: &str) -> Self {
        Self {
            replies: Cursor::new(replies.as_bytes().to_vec()),
            sent: Vec::new(),
        }
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.replies.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sent.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn sent_lines(client: EngineClient<ScriptedStream>) -> Vec<String> {
    let sent = client.into_inner().sent;
    String::from_utf8(sent)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

const OK: &str = "{\"data\":null,\"error\":\"success\"}\n";

#[test]
fn commands_are_encoded_as_single_json_lines() {
    let client = EngineClient::new(ScriptedStream::new(&OK.repeat(6)));

    client.stop().unwrap();
    client.next_track().unwrap();
    client.previous_track().unwrap();
    client.start_disc().unwrap();
    client.play().unwrap();
    client.pause().unwrap();

    assert_eq!(
        sent_lines(client),
        vec![
            r#"{"command":["stop"]}"#,
            r#"{"command":["add","chapter",1]}"#,
            r#"{"command":["add","chapter",-1]}"#,
            r#"{"command":["loadfile","cdda://"]}"#,
            r#"{"command":["set_property","pause",false]}"#,
            r#"{"command":["set_property","pause",true]}"#,
        ]
    );
}

#[test]
fn non_success_error_is_surfaced() {
    let client = EngineClient::new(ScriptedStream::new(
        "{\"data\":null,\"error\":\"property unavailable\"}\n",
    ));
    match client.pause() {
        Err(EngineError::Rejected(msg)) => assert_eq!(msg, "property unavailable"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn time_position_is_converted_to_milliseconds() {
    let client = EngineClient::new(ScriptedStream::new(
        "{\"data\":12.3456,\"error\":\"success\"}\n",
    ));
    assert_eq!(client.time_position_ms().unwrap(), 12_345);
    assert_eq!(
        sent_lines(client),
        vec![r#"{"command":["get_property","time-pos"]}"#]
    );
}

#[test]
fn pause_property_maps_to_is_playing() {
    let client = EngineClient::new(ScriptedStream::new(
        "{\"data\":false,\"error\":\"success\"}\n{\"data\":true,\"error\":\"success\"}\n",
    ));
    assert!(client.is_playing().unwrap());
    assert!(!client.is_playing().unwrap());
}

#[test]
fn wrong_data_type_is_unexpected_response_type() {
    let client = EngineClient::new(ScriptedStream::new(
        "{\"data\":\"soon\",\"error\":\"success\"}\n{\"data\":1,\"error\":\"success\"}\n",
    ));
    assert!(matches!(
        client.time_position_ms(),
        Err(EngineError::UnexpectedResponseType { ref property, ref found })
            if property == "time-pos" && found == "string"
    ));
    assert!(matches!(
        client.is_playing(),
        Err(EngineError::UnexpectedResponseType { ref property, ref found })
            if property == "pause" && found == "number"
    ));
}

#[test]
fn interleaved_events_are_not_taken_as_replies() {
    let client = EngineClient::new(ScriptedStream::new(
        "{\"event\":\"idle\"}\n\n{\"event\":\"start-file\",\"playlist_entry_id\":1}\n{\"data\":null,\"error\":\"success\"}\n",
    ));
    client.start_disc().unwrap();
}

#[test]
fn closed_connection_is_an_error() {
    let client = EngineClient::new(ScriptedStream::new(""));
    assert!(matches!(
        client.stop(),
        Err(EngineError::Closed)
    ));
}

#[test]
fn garbage_reply_is_a_protocol_error() {
    let client = EngineClient::new(ScriptedStream::new("not json\n"));
    assert!(matches!(
        client.play(),
        Err(EngineError::Protocol(_))
    ));
}

#[test]
fn reply_lines_are_classified() {
    assert_eq!(
        protocol::parse_line(r#"{"event":"pause"}"#).unwrap(),
        Incoming::Event("pause".to_string())
    );
    match protocol::parse_line(r#"{"data":1.5,"error":"success","request_id":0}"#).unwrap() {
        Incoming::Reply(r) => {
            assert!(r.is_success());
            assert_eq!(r.data.as_f64(), Some(1.5));
        }
        other => panic!("expected reply, got {other:?}"),
    }
}

fn engine_settings(dir: &tempfile::TempDir, binary: &str, args: &[&str]) -> EngineSettings {
    EngineSettings {
        binary: binary.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        socket_path: dir
            .path()
            .join("mpv-ipc")
            .to_string_lossy()
            .into_owned(),
        ready_timeout_ms: 300,
    }
}

#[test]
fn missing_engine_binary_fails_to_spawn() {
    let dir = tempfile::tempdir().unwrap();
    let settings = engine_settings(&dir, "/nonexistent/oscdp-engine", &[]);

    assert!(matches!(
        Mpv::spawn(&settings),
        Err(EngineError::Spawn { .. })
    ));
}

#[test]
fn engine_exiting_during_startup_is_not_ready() {
    let dir = tempfile::tempdir().unwrap();
    let settings = engine_settings(&dir, "true", &[]);

    assert!(matches!(
        Mpv::spawn(&settings),
        Err(EngineError::NotReady(_))
    ));
}

#[test]
fn silent_engine_times_out_and_stale_socket_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    // `sh -c 'sleep 5'` ignores the IPC options appended after the script.
    let settings = engine_settings(&dir, "sh", &["-c", "sleep 5"]);
    std::fs::write(&settings.socket_path, b"stale").unwrap();

    let started = Instant::now();
    let result = Mpv::spawn(&settings);

    assert!(matches!(result, Err(EngineError::NotReady(_))));
    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(!std::path::Path::new(&settings.socket_path).exists());
}
