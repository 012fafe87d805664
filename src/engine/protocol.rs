//! Wire format of the engine's JSON IPC.
//!
//! Requests are one JSON object per line, `{"command": [...]}`. Replies are
//! `{"data": <any>, "error": "success" | <message>}`. The engine may also
//! push `{"event": ...}` lines at any time; those are not replies.

use serde::Deserialize;
use serde_json::{Value, json};

pub const SUCCESS: &str = "success";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineResponse {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error: String,
}

impl EngineResponse {
    pub fn is_success(&self) -> bool {
        self.error == SUCCESS
    }
}

/// What a line read from the engine turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Reply(EngineResponse),
    Event(String),
}

/// Classify one line read from the engine socket.
pub fn parse_line(line: &str) -> Result<Incoming, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;
    if value.get("error").is_none() {
        if let Some(event) = value.get("event") {
            let name = event.as_str().unwrap_or_default().to_string();
            return Ok(Incoming::Event(name));
        }
    }
    Ok(Incoming::Reply(serde_json::from_value(value)?))
}

/// Encode a request line, newline included.
pub fn encode_request(command: &Value) -> String {
    let mut line = json!({ "command": command }).to_string();
    line.push('\n');
    line
}

pub fn stop() -> Value {
    json!(["stop"])
}

pub fn chapter_step(delta: i64) -> Value {
    json!(["add", "chapter", delta])
}

pub fn load_disc() -> Value {
    json!(["loadfile", "cdda://"])
}

pub fn set_pause(paused: bool) -> Value {
    json!(["set_property", "pause", paused])
}

pub fn get_property(name: &str) -> Value {
    json!(["get_property", name])
}

/// Short type name of a JSON value, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
