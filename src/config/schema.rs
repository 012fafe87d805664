use serde::{Deserialize, Serialize};

/// Top-level settings shared by the player daemon and the panel.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/oscdp/config.toml` or `~/.config/oscdp/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `OSCDP__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub link: LinkSettings,
    pub disc: DiscSettings,
    pub lookup: LookupSettings,
    pub panel: PanelSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Playback engine executable. It must speak mpv's JSON IPC.
    pub binary: String,
    /// Extra arguments passed before the IPC options.
    pub args: Vec<String>,
    /// Path of the IPC socket the engine listens on.
    pub socket_path: String,
    /// How long to wait for the socket to accept connections (milliseconds).
    pub ready_timeout_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            binary: "mpv".to_string(),
            args: Vec::new(),
            socket_path: "/tmp/oscdp-mpv-ipc".to_string(),
            ready_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Serial device connecting host and panel.
    pub device: String,
    pub baud_rate: u32,
    /// Pause after each downstream frame so the panel can keep up (milliseconds).
    pub write_gap_ms: u64,
    /// Run `stty` on the device before opening it.
    pub configure_tty: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            device: "/dev/ttyACM0".to_string(),
            baud_rate: 115_200,
            write_gap_ms: 10,
            configure_tty: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscSettings {
    /// Block device of the optical drive.
    pub device: String,
    /// Device handed to `eject`.
    pub eject_device: String,
    /// Disc size polling interval (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for DiscSettings {
    fn default() -> Self {
        Self {
            device: "/dev/sr0".to_string(),
            eject_device: "/dev/cdrom".to_string(),
            poll_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Query the metadata service for album/artist/track names.
    pub enabled: bool,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://musicbrainz.org/ws/2/".to_string(),
            user_agent: "OSCDP/v0.1 ( danilo.fragoso@gmail.com )".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Minimum time between two accepted key presses, across all keys (milliseconds).
    pub debounce_ms: u64,
    /// Idle tick of both control loops: key scan and render on the panel,
    /// event polling on the player (milliseconds).
    pub tick_ms: u64,
    /// How long the version banner stays up at panel startup (milliseconds).
    pub splash_ms: u64,
    /// Text shown in the header while waiting for the first player frame.
    pub waiting_text: String,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            tick_ms: 13,
            splash_ms: 2000,
            waiting_text: "Waiting Player...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub filter: String,
    /// Directory for the panel's rolling log files.
    pub dir: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "oscdp=info,warn".to_string(),
            dir: ".logs".to_string(),
        }
    }
}
