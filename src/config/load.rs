use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `REPRISE__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("REPRISE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate settings, falling back to defaults when either step
    /// fails. The second value names what was wrong.
    pub fn load_or_default() -> (Self, Option<String>) {
        match Self::load() {
            Ok(s) => match s.validate() {
                Ok(()) => (s, None),
                Err(msg) => (Self::default(), Some(format!("invalid config: {msg}"))),
            },
            Err(e) => (Self::default(), Some(format!("failed to load config: {e}"))),
        }
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.time_update_ms == 0 {
            return Err("audio.time_update_ms must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err("audio.volume must be between 0.0 and 1.0".to_string());
        }
        if self.controls.poll_ms == 0 {
            return Err("controls.poll_ms must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `REPRISE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("REPRISE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/reprise/config.toml`
/// or `~/.config/reprise/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("reprise").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/reprise/reprise.log`
/// or `~/.local/state/reprise/reprise.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("reprise").join("reprise.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
