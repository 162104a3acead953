//! Application settings configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, Result};
use crate::selector::{
    FillField, SelectorSize, DEFAULT_DEBOUNCE_MS, DEFAULT_PLACEHOLDER, DEFAULT_WIDTH,
};

/// Name of the settings file inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Narrowest usable selector.
const MIN_WIDTH: u16 = 16;

/// Application-wide settings.
///
/// Every field has a default, so a partial (or missing) file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Placeholder shown in the empty input.
    pub placeholder: String,
    /// Selector width in terminal columns.
    pub width: u16,
    /// Selector size (controls dropdown height).
    pub size: SelectorSize,
    /// Which option field fills tag text.
    pub fill_props: FillField,
    /// Minimum number of selected tags.
    pub min: Option<usize>,
    /// Maximum number of selected tags.
    pub max: Option<usize>,
    /// Fetch suggestions as soon as the user focuses the input.
    pub focus_fetch: bool,
    /// Debounce window for typed queries, in milliseconds.
    pub debounce_ms: u64,
    /// Event loop tick rate, in milliseconds.
    pub tick_rate_ms: u64,
    /// Simulated catalog latency, in milliseconds.
    pub latency_ms: u64,
    /// Optional JSON file with catalog options.
    pub catalog: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            width: DEFAULT_WIDTH,
            size: SelectorSize::default(),
            fill_props: FillField::default(),
            min: None,
            max: None,
            focus_fetch: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            tick_rate_ms: 50,
            latency_ms: 250,
            catalog: None,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// Returns the defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&contents)?;
        settings.validate()?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Path of the settings file: `<config_dir>/tagselect/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("tagselect").join(CONFIG_FILE_NAME))
    }

    /// Check the settings for contradictions.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if `min` exceeds `max`, the
    /// width is too narrow, or the debounce window is zero.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::ValidationError(format!(
                    "min ({}) cannot be greater than max ({})",
                    min, max
                )));
            }
        }

        if self.width < MIN_WIDTH {
            return Err(ConfigError::ValidationError(format!(
                "width must be at least {} columns",
                MIN_WIDTH
            )));
        }

        if self.debounce_ms == 0 {
            return Err(ConfigError::ValidationError(
                "debounce_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.debounce_ms, 300);
        assert!(settings.focus_fetch);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config("min = 2\nmax = 4\nsize = \"large\"\n");
        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.min, Some(2));
        assert_eq!(settings.max, Some(4));
        assert_eq!(settings.size, SelectorSize::Large);
        assert_eq!(settings.width, DEFAULT_WIDTH);
        assert_eq!(settings.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_load_fill_props() {
        let file = write_config("fill_props = \"value\"\n");
        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.fill_props, FillField::Value);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_config("min = [not toml");
        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_validate_min_greater_than_max() {
        let settings = Settings {
            min: Some(5),
            max: Some(2),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("min (5)"));
    }

    #[test]
    fn test_validate_narrow_width() {
        let settings = Settings {
            width: 4,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_zero_debounce() {
        let settings = Settings {
            debounce_ms: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_config_path_structure() {
        if let Ok(path) = Settings::config_path() {
            assert!(path.ends_with("tagselect/config.toml"));
        }
    }
}
