use crate::config::Settings;

/// Load settings, falling back to defaults when the file or environment is
/// unusable. Runs before logging is set up, so problems go to stderr.
pub fn load_settings() -> Settings {
    let checked = Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });

    match checked {
        Ok(settings) => settings,
        // The player must come up even without a usable config.
        Err(reason) => {
            eprintln!("oscdp: {reason}, using defaults");
            Settings::default()
        }
    }
}
