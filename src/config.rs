//! Persisted user settings.
//!
//! Read once at startup and written once at shutdown, as TOML under the
//! platform config directory (`~/.config/taildiff/settings.toml` on Linux).

use crate::error::{Result, TaildiffError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "taildiff";
const CONFIG_FILENAME: &str = "settings.toml";

/// How many recently opened files are remembered
pub const MAX_RECENT_FILES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Most recently opened first
    pub last_open_files: Vec<PathBuf>,

    /// Newest line at the top of the view (false: at the bottom)
    pub append_to_top: bool,

    pub template_folder: Option<PathBuf>,

    /// Quiescence window of the change notifier
    pub debounce_ms: u64,

    /// Delay before a prompt edit is applied
    pub input_debounce_ms: u64,

    /// Fallback re-read interval when no change notification arrives
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_open_files: Vec::new(),
            append_to_top: true,
            template_folder: None,
            debounce_ms: 500,
            input_debounce_ms: 300,
            poll_interval_ms: 1000,
        }
    }
}

impl Settings {
    /// Default location of the settings file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
    }

    /// Load from the default location. Missing file or config directory yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; defaults when it does not exist, an error when it does not parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| TaildiffError::file_error("Failed to read settings", e))?;
        toml::from_str(&content)
            .map_err(|e| TaildiffError::config(format!("Invalid {}: {}", path.display(), e)))
    }

    /// Write to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()
            .ok_or_else(|| TaildiffError::config("No configuration directory on this platform"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| TaildiffError::file_error("Failed to create settings directory", e))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| TaildiffError::config(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, content)
            .map_err(|e| TaildiffError::file_error("Failed to write settings", e))?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Record `path` as the most recently opened file.
    pub fn remember_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.last_open_files.retain(|known| *known != path);
        self.last_open_files.insert(0, path);
        self.last_open_files.truncate(MAX_RECENT_FILES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let settings = Settings::load_from(&temp.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.append_to_top);
        assert_eq!(settings.debounce_ms, 500);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "append_to_top = false\ninput_debounce_ms = 50\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert!(!settings.append_to_top);
        assert_eq!(settings.input_debounce_ms, 50);
        assert_eq!(settings.poll_interval_ms, 1000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(TaildiffError::ConfigError { .. })
        ));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("settings.toml");
        let mut settings = Settings::default();
        settings.remember_file("/var/log/syslog");
        settings.template_folder = Some(PathBuf::from("/srv/templates"));

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn remember_file_dedups_and_caps() {
        let mut settings = Settings::default();
        for idx in 0..12 {
            settings.remember_file(format!("/logs/{idx}.log"));
        }
        settings.remember_file("/logs/5.log");

        assert_eq!(settings.last_open_files.len(), MAX_RECENT_FILES);
        assert_eq!(settings.last_open_files[0], PathBuf::from("/logs/5.log"));
        assert_eq!(settings.last_open_files[1], PathBuf::from("/logs/11.log"));
        assert_eq!(
            settings
                .last_open_files
                .iter()
                .filter(|p| p.ends_with("5.log"))
                .count(),
            1
        );
    }
}
