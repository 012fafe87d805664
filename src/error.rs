//! Error types shared across the player and the panel.
//!
//! Each concern gets its own enum so callers can tell a framing glitch
//! (which is swallowed) apart from an engine failure (which is surfaced).

use std::io;

use thiserror::Error;

/// Failures while turning a TOC descriptor into a `Disc`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TocError {
    #[error("malformed TOC: {0}")]
    Malformed(String),
    #[error("invalid TOC field {field}: {value:?}")]
    InvalidField { field: String, value: String },
}

impl TocError {
    pub fn invalid_field(field: impl Into<String>, value: &str) -> Self {
        TocError::InvalidField {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

/// Failures talking to the playback engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to spawn engine process {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },
    #[error("engine socket {0} did not become ready")]
    NotReady(String),
    #[error("engine transport error: {0}")]
    Transport(#[from] io::Error),
    #[error("engine closed the connection")]
    Closed,
    #[error("engine protocol error: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("engine rejected command: {0}")]
    Rejected(String),
    #[error("unexpected response type for {property}: {found}")]
    UnexpectedResponseType { property: String, found: String },
}

/// Failures on the serial link between host and panel.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("failed to open link {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to configure link {device}: {message}")]
    Configure { device: String, message: String },
    #[error("link transport error: {0}")]
    Transport(#[from] io::Error),
}

/// Malformed frames on the link. These are logged and skipped, never fatal.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("display frame without a section separator: {0:?}")]
    Framing(String),
    #[error("unknown display section {0:?}")]
    UnknownSection(String),
    #[error("invalid key event: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
}

/// Failures of the remote metadata service.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("metadata lookup unavailable: {0}")]
    Unavailable(String),
    #[error("metadata lookup rate limit exceeded, try again later")]
    RateLimited,
    #[error("metadata lookup returned HTTP status {0}")]
    Status(u16),
    #[error("failed to parse metadata response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures reading or controlling the optical drive.
#[derive(Error, Debug)]
pub enum DiscError {
    #[error(transparent)]
    Toc(#[from] TocError),
    #[error("failed to run {command}: {source}")]
    Command {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("unreadable drive output from {command}: {output:?}")]
    Unreadable { command: String, output: String },
}
