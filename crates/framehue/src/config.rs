//! Configuration files.
//!
//! A configuration carries the two palette color lists, an optional
//! stored mode preference, and an optional host toolbar color used for
//! mode detection. Omitted lists fall back to the built-in reference
//! palette.
//!
//! The stored preference is written back by [`Config::remember_mode`] after
//! a detection source worth persisting has answered.
//!
//! ```toml
//! preferred_mode = "dark"
//! light = ["#B8103D", "#7A21C7"]
//! dark = ["#FF4081", "#E040FB"]
//! ```
//!
//! # Example
//!
//! ```rust
//! use framehue::{Config, Mode};
//!
//! let config = Config::from_toml(r##"
//!     preferred_mode = "dark"
//!     light = ["#B8103D", "#7A21C7"]
//!     dark = ["#FF4081", "#E040FB"]
//! "##).unwrap();
//! assert_eq!(config.preferred_mode, Some(Mode::Dark));
//! assert_eq!(config.palette().colors(Mode::Dark).len(), 2);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::color::Color;
use crate::mode::Mode;
use crate::palette::{PaletteConfig, PaletteValidationError};

/// Settings loaded from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Stored mode preference, consulted first during detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_mode: Option<Mode>,

    /// Host toolbar color; its luminance decides the mode when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbar_color: Option<Color>,

    /// Light mode frame colors.
    #[serde(default = "reference_light")]
    pub light: Vec<Color>,

    /// Dark mode frame colors, positionally matched to `light`.
    #[serde(default = "reference_dark")]
    pub dark: Vec<Color>,
}

fn reference_light() -> Vec<Color> {
    PaletteConfig::reference().light
}

fn reference_dark() -> Vec<Color> {
    PaletteConfig::reference().dark
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferred_mode: None,
            toolbar_color: None,
            light: reference_light(),
            dark: reference_dark(),
        }
    }
}

impl Config {
    /// Returns the palette color lists.
    pub fn palette(&self) -> PaletteConfig {
        PaletteConfig::new(self.light.clone(), self.dark.clone())
    }

    /// Sets the stored mode preference.
    pub fn with_preferred_mode(mut self, mode: Mode) -> Self {
        self.preferred_mode = Some(mode);
        self
    }

    /// Stores `mode` as the preference and saves the configuration to `path`.
    ///
    /// Returns false without writing if `mode` is already the stored
    /// preference.
    ///
    /// # Errors
    /// Returns `ConfigSaveError` if serialization or writing fails.
    pub fn remember_mode(
        &mut self,
        mode: Mode,
        path: impl AsRef<Path>,
    ) -> Result<bool, ConfigSaveError> {
        if self.preferred_mode == Some(mode) {
            return Ok(false);
        }
        self.preferred_mode = Some(mode);
        let path = path.as_ref();
        self.to_file(path)?;
        info!(config.path = %path.display(), mode = %mode, "Stored detected mode");
        Ok(true)
    }

    /// Validate the palette lists.
    ///
    /// # Errors
    /// Returns `PaletteValidationError` if a list is empty, holds an invalid
    /// color, or repeats a color.
    pub fn validate(&self) -> Result<(), PaletteValidationError> {
        self.palette().validate()
    }

    /// Load a configuration from JSON text.
    ///
    /// # Errors
    /// Returns `ConfigLoadError` if JSON parsing or validation fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from TOML text.
    ///
    /// # Errors
    /// Returns `ConfigLoadError` if TOML parsing or validation fails.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigLoadError> {
        let config: Config = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from YAML text.
    ///
    /// # Errors
    /// Returns `ConfigLoadError` if YAML parsing or validation fails.
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a file (format inferred by extension).
    ///
    /// # Errors
    /// Returns `ConfigLoadError` if reading, parsing, or validation fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(config.path = %path.display(), "Loading configuration");
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            Some("yaml" | "yml") => {
                #[cfg(feature = "yaml")]
                {
                    Self::from_yaml(&content)
                }
                #[cfg(not(feature = "yaml"))]
                {
                    Err(ConfigLoadError::UnsupportedFormat("yaml".into()))
                }
            }
            Some(ext) => Err(ConfigLoadError::UnsupportedFormat(ext.into())),
            None => Err(ConfigLoadError::UnsupportedFormat("unknown".into())),
        }
    }

    /// Serialize this configuration to JSON.
    ///
    /// # Errors
    /// Returns `ConfigSaveError` if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigSaveError> {
        serde_json::to_string_pretty(self).map_err(ConfigSaveError::Json)
    }

    /// Serialize this configuration to TOML.
    ///
    /// # Errors
    /// Returns `ConfigSaveError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigSaveError> {
        toml::to_string_pretty(self).map_err(ConfigSaveError::Toml)
    }

    /// Serialize this configuration to YAML.
    ///
    /// # Errors
    /// Returns `ConfigSaveError` if serialization fails.
    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> Result<String, ConfigSaveError> {
        serde_yaml::to_string(self).map_err(ConfigSaveError::Yaml)
    }

    /// Save this configuration to a file (format inferred by extension).
    ///
    /// # Errors
    /// Returns `ConfigSaveError` if serialization or writing fails.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigSaveError> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.to_json()?,
            Some("toml") | None => self.to_toml()?,
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => self.to_yaml()?,
            Some(ext) => return Err(ConfigSaveError::UnsupportedFormat(ext.into())),
        };

        fs::write(path, content).map_err(ConfigSaveError::Io)
    }
}

/// Error loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    Validation(#[from] PaletteValidationError),
}

/// Error saving a configuration.
#[derive(Error, Debug)]
pub enum ConfigSaveError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_reference_palette() {
        let config = Config::from_toml("").expect("empty toml");
        assert_eq!(config, Config::default());
        assert_eq!(config.palette(), PaletteConfig::reference());
        assert_eq!(config.preferred_mode, None);
    }

    #[test]
    fn test_partial_override() {
        let config =
            Config::from_json(r##"{"light": ["#111111", "#222222"]}"##).expect("parse json");
        assert_eq!(config.light.len(), 2);
        assert_eq!(config.dark.len(), 15);
    }

    #[test]
    fn test_invalid_color_is_a_parse_error() {
        let err = Config::from_toml(r#"light = ["burgundy"]"#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Toml(_)));
    }

    #[test]
    fn test_duplicate_color_fails_validation() {
        let err = Config::from_toml(r##"dark = ["#FFFFFF", "#ffffff"]"##).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Validation(PaletteValidationError::DuplicateColor { .. })
        ));
    }

    #[test]
    fn test_empty_list_fails_validation() {
        let err = Config::from_json(r#"{"dark": []}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Validation(PaletteValidationError::Empty(Mode::Dark))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default().with_preferred_mode(Mode::Dark);
        let toml = config.to_toml().expect("serialize toml");
        let loaded = Config::from_toml(&toml).expect("load toml");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_file_roundtrip_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let json_path = dir.path().join("framehue.json");
        let config = Config::default().with_preferred_mode(Mode::Light);
        config.to_file(&json_path).expect("write json");
        assert_eq!(Config::from_file(&json_path).expect("read json"), config);
    }

    #[test]
    fn test_remember_mode_writes_preference() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("framehue.toml");
        let mut config = Config::default();

        assert!(config.remember_mode(Mode::Dark, &path).expect("save"));
        let loaded = Config::from_file(&path).expect("reload");
        assert_eq!(loaded.preferred_mode, Some(Mode::Dark));
        assert_eq!(loaded.palette(), config.palette());

        fs::remove_file(&path).expect("remove");
        assert!(!config.remember_mode(Mode::Dark, &path).expect("unchanged"));
        assert!(!path.exists());
    }

    #[test]
    fn test_remember_mode_unsupported_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::default();
        let err = config
            .remember_mode(Mode::Light, dir.path().join("framehue.ini"))
            .unwrap_err();
        assert!(matches!(err, ConfigSaveError::UnsupportedFormat(ext) if ext == "ini"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_remember_mode_yaml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("framehue.yaml");
        let mut config = Config::default();
        assert!(config.remember_mode(Mode::Light, &path).expect("save"));
        let loaded = Config::from_file(&path).expect("reload");
        assert_eq!(loaded.preferred_mode, Some(Mode::Light));
    }

    #[test]
    fn test_toolbar_color() {
        let config = Config::from_toml(r##"toolbar_color = "#121212""##).expect("parse");
        assert_eq!(config.toolbar_color, Some(Color::from("#121212")));
        assert!(!Config::default().to_toml().expect("toml").contains("toolbar_color"));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("framehue.ini");
        fs::write(&path, "").expect("write");
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigLoadError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }
}
