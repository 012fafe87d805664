use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers the optional config file first, then lets
/// `OSCDP__` environment variables override it. Anything neither source sets
/// keeps its struct default.
impl Settings {
    /// Load settings from the optional config file, overridden by the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("OSCDP")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.engine.binary.trim().is_empty() {
            return Err("engine.binary must not be empty".to_string());
        }
        if self.engine.socket_path.trim().is_empty() {
            return Err("engine.socket_path must not be empty".to_string());
        }
        if self.link.device.trim().is_empty() {
            return Err("link.device must not be empty".to_string());
        }
        if self.link.baud_rate == 0 {
            return Err("link.baud_rate must be >= 1".to_string());
        }
        if self.disc.poll_interval_ms == 0 {
            return Err("disc.poll_interval_ms must be >= 1".to_string());
        }
        if self.panel.tick_ms == 0 {
            return Err("panel.tick_ms must be >= 1".to_string());
        }
        Ok(())
    }

    /// Render the settings as a TOML document.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `OSCDP_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("OSCDP_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/oscdp/config.toml`
/// or `~/.config/oscdp/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("oscdp").join("config.toml"))
}
